pub mod progress_logger;
pub mod results_printer;
