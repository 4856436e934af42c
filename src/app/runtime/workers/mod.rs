/// Inventory fetch worker.
pub mod fetch;
/// External barcode scanner launcher.
pub mod scanner;
