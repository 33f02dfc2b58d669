use crate::api::CourtyardClient;
use crate::components::charts;
use crate::components::error_panel::ErrorPanel;
use crate::components::stat_card::StatCard;
use shared::models::DashboardStats;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

/// Collection percentage with one decimal, as the stat card shows it.
fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Amount with thousands separators; decimals only when present.
fn format_amount(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (position, digit) in digits.chars().enumerate() {
        if position > 0 && (digits.len() - position) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(&grouped);
    if fraction != 0 {
        out.push_str(&format!(".{fraction:02}"));
    }
    out
}

/// Headline for the arrears card: the worst building, or 无.
fn worst_arrears(stats: &DashboardStats) -> String {
    stats
        .arrears_by_building
        .first()
        .map(|row| format!("{}#", row.building_no))
        .unwrap_or_else(|| "无".to_string())
}

fn total_income(stats: &DashboardStats) -> f64 {
    stats
        .income_distribution
        .iter()
        .map(|slice| slice.total_amount)
        .sum()
}

/// Estate statistics: three headline cards plus the income pie and the
/// arrears bar chart.
#[function_component(DashboardPage)]
pub fn dashboard_page() -> Html {
    let stats = use_state(|| None::<DashboardStats>);
    let error = use_state(|| None::<String>);
    let income_canvas = use_node_ref();
    let arrears_canvas = use_node_ref();

    {
        let stats = stats.clone();
        let error = error.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let client = CourtyardClient::shared();
                match client.dashboard_stats().await {
                    Ok(envelope) => match envelope.ok() {
                        Ok(data) => {
                            stats.set(Some(data));
                            error.set(None);
                        }
                        Err(message) => error.set(Some(format!("统计数据加载失败: {message}"))),
                    },
                    Err(err) => {
                        log::error!("dashboard stats fetch failed: {err}");
                        error.set(Some(format!("统计数据加载失败: {err}")));
                    }
                }
            });
            || ()
        });
    }

    // Redraw both charts whenever a fresh dataset lands. Clearing inside
    // the draw calls keeps stale renders from stacking.
    {
        let income_canvas = income_canvas.clone();
        let arrears_canvas = arrears_canvas.clone();
        use_effect_with((*stats).clone(), move |stats| {
            if let Some(stats) = stats {
                if let Some(canvas) = income_canvas.cast::<HtmlCanvasElement>() {
                    charts::draw_income_pie(&canvas, &stats.income_distribution);
                }
                if let Some(canvas) = arrears_canvas.cast::<HtmlCanvasElement>() {
                    charts::draw_arrears_bars(&canvas, &stats.arrears_by_building);
                }
            }
            || ()
        });
    }

    let error_banner = (*error).clone().map_or_else(
        || html! {},
        |message| html! { <ErrorPanel message={message} /> },
    );

    let content = match &*stats {
        Some(stats) => html! {
            <>
                <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
                    <StatCard
                        title="物业费收缴率"
                        value={format_rate(stats.collection_rate.rate)}
                        detail={format!(
                            "已缴: {} / 总计: {}",
                            stats.collection_rate.paid, stats.collection_rate.total
                        )}
                    />
                    <StatCard
                        title="总收入"
                        value={format!("¥ {}", format_amount(total_income(stats)))}
                    />
                    <StatCard
                        title="欠费最多楼栋"
                        value={worst_arrears(stats)}
                    />
                </div>
                <div class="grid grid-cols-1 lg:grid-cols-2 gap-6">
                    <div class="card bg-base-200 shadow p-4">
                        <h2 class="font-semibold mb-2">{"收入来源分布"}</h2>
                        <canvas ref={income_canvas} width="420" height="300" class="w-full"></canvas>
                    </div>
                    <div class="card bg-base-200 shadow p-4">
                        <h2 class="font-semibold mb-2">{"各楼栋欠费数量"}</h2>
                        <canvas ref={arrears_canvas} width="420" height="300" class="w-full"></canvas>
                    </div>
                </div>
            </>
        },
        None if error.is_none() => html! {
            <div class="text-base-content/60">{"加载中..."}</div>
        },
        None => html! {},
    };

    html! {
        <div class="space-y-6">
            { error_banner }
            { content }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ArrearsRow, CollectionRate, IncomeSlice};

    fn stats(arrears: Vec<ArrearsRow>) -> DashboardStats {
        DashboardStats {
            collection_rate: CollectionRate {
                rate: 0.825,
                paid: 33,
                total: 40,
            },
            income_distribution: vec![
                IncomeSlice {
                    fee_type: "PROPERTY_FEE".into(),
                    total_amount: 12000.0,
                },
                IncomeSlice {
                    fee_type: "WATER_FEE".into(),
                    total_amount: 500.5,
                },
            ],
            arrears_by_building: arrears,
        }
    }

    #[test]
    fn rate_renders_with_one_decimal() {
        assert_eq!(format_rate(0.825), "82.5%");
        assert_eq!(format_rate(1.0), "100.0%");
    }

    #[test]
    fn amounts_get_thousands_separators() {
        assert_eq!(format_amount(12000.0), "12,000");
        assert_eq!(format_amount(1234567.5), "1,234,567.50");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(0.0), "0");
    }

    #[test]
    fn income_sums_every_slice() {
        assert_eq!(total_income(&stats(Vec::new())), 12500.5);
    }

    #[test]
    fn worst_arrears_takes_the_first_row_or_none() {
        let with_rows = stats(vec![
            ArrearsRow {
                building_no: "5".into(),
                unpaid_count: 7,
            },
            ArrearsRow {
                building_no: "2".into(),
                unpaid_count: 3,
            },
        ]);
        assert_eq!(worst_arrears(&with_rows), "5#");
        assert_eq!(worst_arrears(&stats(Vec::new())), "无");
    }
}
