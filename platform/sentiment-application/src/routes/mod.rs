use sentiment_domain::value_objects::contract::Contract;

pub const POLARITY_ANALYSIS_PATH: &str = "/sentiment/analysis";
pub const CLASSIFICATION_ANALYSIS_PATH: &str = "/analyze_sentiment";
pub const DOC_PATH: &str = "/sentiment/doc";

pub const DOC_NOT_FOUND_MESSAGE: &str = "Documentation not found";
pub const DOC_ERROR_PREFIX: &str = "Internal server error";

pub fn analysis_path(contract: Contract) -> &'static str {
    match contract {
        Contract::Polarity => POLARITY_ANALYSIS_PATH,
        Contract::Classification => CLASSIFICATION_ANALYSIS_PATH,
    }
}

/// Prefix of the `detail` message for classifier and internal failures on the
/// analysis route. Each contract keeps its own wording.
pub fn analysis_error_prefix(contract: Contract) -> &'static str {
    match contract {
        Contract::Polarity => "Internal Server Error",
        Contract::Classification => "Error processing request",
    }
}
