pub mod config;
pub mod container;
pub mod decode;
pub mod fetch;
pub mod fields;
pub mod links;
pub mod logging;
pub mod populator;
pub mod service;

pub use config::Config;
pub use container::{Container, FieldContainer};
pub use fetch::{CsvSource, FileCsvSource, HttpCsvSource};
pub use fields::{FieldKind, RelationshipType, SelectField, SelectOption};
pub use links::{extract_company_names, ParseMode};
pub use populator::{FormPopulator, PopulateOutcome};
