use crate::models::{DocumentationRequest, HttpMethod, Parameters};

pub const EXAMPLE_PARAMETERS: &str = r#"{
    "number1": "integer - First number to add",
    "number2": "integer - Second number to add"
}"#;

pub const EXAMPLE_PANEL: &str = r#"Example: Sum Calculator API

How it works:
  1. You provide input     -> API details (name, method, endpoint, parameters)
  2. System creates prompt -> Formats your input for Azure OpenAI
  3. Azure OpenAI responds -> AI generates professional documentation
  4. Documentation returned -> Complete API docs with examples
  5. Stored locally        -> Saved in memory and optionally to a JSON file

Example input:
  API Name:    Sum Calculator
  Method:      POST
  Endpoint:    /api/v1/calculator/sum
  Description: Calculates the sum of two numbers
  Parameters:
    {
        "number1": "integer - First number to add",
        "number2": "integer - Second number to add"
    }

Example output (AI-generated):

  API Documentation: Sum Calculator

  Description:
    This endpoint accepts two numeric values and returns their sum.

  Request Format:
    POST /api/v1/calculator/sum
    Content-Type: application/json

    {
      "number1": 5,
      "number2": 10
    }

  Response Format:
    {
      "result": 15,
      "status": "success"
    }

  Possible Error Codes:
    - 400: Bad Request (invalid parameters)
    - 422: Unprocessable Entity (non-numeric values)
    - 500: Internal Server Error

  Usage Notes:
    - Both parameters are required
    - Values must be valid integers
    - Response is returned in JSON format
"#;

/// The Sum Calculator request shown in the example panel.
pub fn example_request() -> DocumentationRequest {
    DocumentationRequest {
        api_name: "Sum Calculator".to_string(),
        method: HttpMethod::Post,
        endpoint: "/api/v1/calculator/sum".to_string(),
        description: "Calculates the sum of two numbers".to_string(),
        parameters: Parameters::parse_input(EXAMPLE_PARAMETERS).parameters,
    }
}
