//! Library seat booking service with a brush-paint floor layout editor.
//!
//! Students browse libraries and their floor maps, request seats, and ask an
//! LLM for seat suggestions. Admins approve or decline bookings and edit grid
//! floors by painting cells with a seat-kind brush. All state is in memory,
//! seeded at startup.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | Seats, floors, libraries; grid and flexible floor layouts |
//! | [`layout::paint`] | Brush-paint engine and seat relabeling |
//! | [`layout::seed`] | Demo locations, libraries, and floors |
//! | [`store`] | In-memory repository |
//! | [`services`] | Booking transitions and LLM seat suggestions |
//! | [`llm`] | Anthropic / OpenAI-compatible chat clients |
//! | [`routes`] | Axum JSON API |
//! | [`state`] | Shared handler state |
//! | [`config`] | Environment configuration |

pub mod config;
pub mod layout;
pub mod llm;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
