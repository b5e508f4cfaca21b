//! Table and export building blocks shared by the dashboard views.

pub mod csv_export;
pub mod data_table;
pub mod table_query;

pub use csv_export::{CsvExport, DatasetSelection, ExportError, ExportFormat};
pub use data_table::DataTableConfig;
pub use table_query::{FILTER_ALL, Record, SortField, TablePage, TableQuery};
