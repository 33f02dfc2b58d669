//! Wire models shared between the Courtyard web console and its REST backend.
//!
//! Everything here mirrors what the backend serializes: the uniform response
//! envelope plus the user, property, utility-card, wallet and dashboard
//! records. Pure data, no I/O.

pub mod models;
