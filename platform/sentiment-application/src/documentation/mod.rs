use crate::config::DocsConfig;
use crate::routes::{self, DOC_ERROR_PREFIX, DOC_NOT_FOUND_MESSAGE, DOC_PATH};
use schemars::gen::SchemaSettings;
use schemars::schema::Schema;
use sentiment_domain::errors::ServiceError;
use sentiment_domain::value_objects::contract::Contract;
use sentiment_domain::value_objects::detail::ErrorDetail;
use sentiment_domain::value_objects::sentiment_result::{ClassificationResult, PolarityResult};
use sentiment_domain::value_objects::text_input::{TextInput, EMPTY_TEXT_MESSAGE};
use serde_json::{json, Value};

pub const OPENAPI_VERSION: &str = "3.0.3";

/// OpenAPI description of the routes mounted for one contract.
#[derive(Debug, Clone)]
pub struct ApiDocumentation {
    docs: DocsConfig,
    contract: Contract,
}

impl ApiDocumentation {
    pub fn new(docs: DocsConfig, contract: Contract) -> Self {
        Self { docs, contract }
    }

    /// Builds the full document on every call; either the whole document or an
    /// error is returned.
    pub fn get_documentation(&self) -> Result<Value, ServiceError> {
        if !self.docs.enabled {
            return Err(ServiceError::NotFound(DOC_NOT_FOUND_MESSAGE.to_string()));
        }
        self.build().map_err(ServiceError::Internal)
    }

    fn build(&self) -> Result<Value, String> {
        let mut generator = SchemaSettings::openapi3().into_generator();
        let input_schema = generator.subschema_for::<TextInput>();
        let output_schema = match self.contract {
            Contract::Polarity => generator.subschema_for::<PolarityResult>(),
            Contract::Classification => generator.subschema_for::<ClassificationResult>(),
        };
        let error_schema = generator.subschema_for::<ErrorDetail>();

        let schemas = serde_json::to_value(generator.definitions())
            .map_err(|err| format!("failed to serialize component schemas: {err}"))?;
        let input_schema = schema_value(&input_schema)?;
        let output_schema = schema_value(&output_schema)?;
        let error_schema = schema_value(&error_schema)?;

        let analysis_path = routes::analysis_path(self.contract);
        let error_prefix = routes::analysis_error_prefix(self.contract);

        let mut paths = serde_json::Map::new();
        paths.insert(
            analysis_path.to_string(),
            json!({
                "post": {
                    "summary": "Analyze Sentiment",
                    "description": self.analysis_description(),
                    "operationId": "analyze_sentiment",
                    "requestBody": {
                        "required": true,
                        "content": {
                            "application/json": { "schema": input_schema }
                        }
                    },
                    "responses": {
                        "200": json_response(
                            "Successful sentiment analysis",
                            &output_schema,
                            self.success_example(),
                        ),
                        "400": json_response(
                            "Bad request - input cannot be empty",
                            &error_schema,
                            json!({ "detail": EMPTY_TEXT_MESSAGE }),
                        ),
                        "500": json_response(
                            "Internal server error",
                            &error_schema,
                            json!({ "detail": format!("{error_prefix}: Some unexpected issue") }),
                        ),
                    }
                }
            }),
        );
        paths.insert(
            DOC_PATH.to_string(),
            json!({
                "get": {
                    "summary": "API Documentation",
                    "description": "Returns the OpenAPI documentation in JSON format.",
                    "operationId": "get_documentation",
                    "responses": {
                        "200": { "description": "Returns OpenAPI JSON documentation" },
                        "404": json_response(
                            "Documentation not available",
                            &error_schema,
                            json!({ "detail": DOC_NOT_FOUND_MESSAGE }),
                        ),
                        "500": json_response(
                            "Internal server error",
                            &error_schema,
                            json!({ "detail": format!("{DOC_ERROR_PREFIX}: Some unexpected issue") }),
                        ),
                    }
                }
            }),
        );

        Ok(json!({
            "openapi": OPENAPI_VERSION,
            "info": {
                "title": self.docs.title,
                "description": self.docs.description,
                "version": self.docs.version,
            },
            "paths": paths,
            "components": { "schemas": schemas },
        }))
    }

    fn analysis_description(&self) -> &'static str {
        match self.contract {
            Contract::Polarity => {
                "Receives a text input and returns its sentiment (positive, negative, or neutral) \
                 along with a score. POSITIVE if the compound score is greater than 0, NEGATIVE \
                 if it is less than 0, NEUTRAL if it is exactly 0."
            }
            Contract::Classification => {
                "Receives a text input and returns the label and confidence produced by a \
                 pre-trained sentiment classification model."
            }
        }
    }

    fn success_example(&self) -> Value {
        match self.contract {
            Contract::Polarity => json!({ "label": "POSITIVE", "score": 0.75 }),
            Contract::Classification => json!({ "sentiment": "POSITIVE", "confidence": 0.98 }),
        }
    }
}

fn schema_value(schema: &Schema) -> Result<Value, String> {
    serde_json::to_value(schema).map_err(|err| format!("failed to serialize schema: {err}"))
}

fn json_response(description: &str, schema: &Value, example: Value) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": schema,
                "example": example,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::ApiDocumentation;
    use crate::config::DocsConfig;
    use sentiment_domain::errors::ServiceError;
    use sentiment_domain::value_objects::contract::Contract;

    #[test]
    fn disabled_docs_are_not_found() {
        let docs = DocsConfig {
            enabled: false,
            ..DocsConfig::default()
        };
        let err = ApiDocumentation::new(docs, Contract::Polarity)
            .get_documentation()
            .expect_err("disabled");
        assert_eq!(
            err,
            ServiceError::NotFound("Documentation not found".to_string())
        );
    }

    #[test]
    fn polarity_document_lists_polarity_routes_only() {
        let doc = ApiDocumentation::new(DocsConfig::default(), Contract::Polarity)
            .get_documentation()
            .expect("doc");
        assert_eq!(doc["openapi"], "3.0.3");
        assert_eq!(doc["info"]["title"], "Sentiment API");
        assert!(doc["paths"]["/sentiment/analysis"]["post"].is_object());
        assert!(doc["paths"]["/sentiment/doc"]["get"].is_object());
        assert!(doc["paths"]["/analyze_sentiment"].is_null());

        let schemas = &doc["components"]["schemas"];
        assert!(schemas["TextInput"].is_object());
        assert!(schemas["PolarityResult"].is_object());
        assert!(schemas["SentimentLabel"].is_object());
        assert!(schemas["ErrorDetail"].is_object());
    }

    #[test]
    fn schema_refs_point_into_components() {
        let doc = ApiDocumentation::new(DocsConfig::default(), Contract::Classification)
            .get_documentation()
            .expect("doc");
        let post = &doc["paths"]["/analyze_sentiment"]["post"];
        assert_eq!(
            post["requestBody"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/TextInput"
        );
        assert_eq!(
            post["responses"]["200"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ClassificationResult"
        );
        assert_eq!(
            post["responses"]["500"]["content"]["application/json"]["example"]["detail"],
            "Error processing request: Some unexpected issue"
        );
    }
}
