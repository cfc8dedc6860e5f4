//! Player metric dashboard for Driblab exports.
//!
//! Data flows one way on every user interaction:
//! ```text
//!  .csv / .json / .parquet
//!        │
//!        ▼
//!   ┌──────────────┐
//!   │ DatasetStore │  both exports, loaded and classified once
//!   └──────────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │  filter  │  macro-position → minutes → players/metrics
//!   └──────────┘
//!        │
//!        ▼
//!   ┌──────────┐
//!   │ encoding │  p25/p75 → colour, size, border, jitter
//!   └──────────┘
//!        │
//!        ▼
//!   scatter + sorted table
//! ```

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod encoding;
pub mod state;
pub mod table;
pub mod ui;
