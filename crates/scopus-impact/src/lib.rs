//! Scopus citation impact
//!
//! Queries Scopus for the documents citing a researcher, classifies each one
//! as a self-citation, a citation from a first author already counted, or a
//! fresh citing author, and aggregates the counts per year.
//!
//! # Example
//!
//! ```no_run
//! use scopus_impact::{config::Config, impact, ScopusClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = ScopusClient::new(Config::from_env()?)?;
//!     let mut pool = impact::AuthorPool::new();
//!     let report = impact::run(&client, 7_004_212_771, &mut pool).await?;
//!     println!("{}", scopus_impact::formatters::format_report(&report, false));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod impact;
pub mod models;

pub use client::{CitationSource, ScopusClient};
pub use config::Config;
pub use error::{ClientError, ImpactError};
