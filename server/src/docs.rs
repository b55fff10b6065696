//! OpenAPI document for the todo routes, served at `{API_PREFIX}/openapi.json`,
//! plus the Swagger UI (`/docs`) and ReDoc (`/redoc`) pages that render it.

use std::sync::Arc;

use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};

use crate::config::Settings;
use crate::models::{DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS};

pub fn openapi_document(settings: &Settings) -> Value {
    let collection = format!("{}/todos/", settings.api_prefix);
    let item = format!("{}/todos/{{id}}", settings.api_prefix);

    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);
    let todo_body = json!({
        "required": true,
        "content": { "application/json": { "schema": { "$ref": "#/components/schemas/TodoInput" } } }
    });
    let todo_response = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Todo" } } }
        })
    };
    let error_response = |description: &str| {
        json!({
            "description": description,
            "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Error" } } }
        })
    };

    json!({
        "openapi": "3.1.0",
        "info": {
            "title": settings.project_name,
            "description": settings.project_description,
            "version": settings.version,
        },
        "paths": {
            collection: {
                "get": {
                    "tags": ["todos"],
                    "summary": "List todos",
                    "responses": {
                        "200": {
                            "description": "All todos",
                            "content": { "application/json": { "schema": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Todo" }
                            } } }
                        }
                    }
                },
                "post": {
                    "tags": ["todos"],
                    "summary": "Create a todo",
                    "requestBody": todo_body,
                    "responses": {
                        "201": todo_response("Created todo"),
                        "422": error_response("Invalid payload"),
                    }
                }
            },
            item: {
                "get": {
                    "tags": ["todos"],
                    "summary": "Get a todo",
                    "parameters": id_param,
                    "responses": {
                        "200": todo_response("The todo"),
                        "404": error_response("Unknown id"),
                    }
                },
                "put": {
                    "tags": ["todos"],
                    "summary": "Replace a todo",
                    "parameters": id_param,
                    "requestBody": todo_body,
                    "responses": {
                        "200": todo_response("Updated todo"),
                        "404": error_response("Unknown id"),
                        "422": error_response("Invalid payload"),
                    }
                },
                "delete": {
                    "tags": ["todos"],
                    "summary": "Delete a todo",
                    "parameters": id_param,
                    "responses": {
                        "204": { "description": "Deleted" },
                        "404": error_response("Unknown id"),
                    }
                }
            }
        },
        "components": {
            "schemas": {
                "Todo": {
                    "type": "object",
                    "required": ["id", "title", "description", "done"],
                    "properties": {
                        "id": { "type": "string" },
                        "title": { "type": "string", "minLength": 1, "maxLength": TITLE_MAX_CHARS },
                        "description": { "type": "string", "maxLength": DESCRIPTION_MAX_CHARS },
                        "done": { "type": "boolean" }
                    }
                },
                "TodoInput": {
                    "type": "object",
                    "required": ["title"],
                    "properties": {
                        "title": { "type": "string", "minLength": 1, "maxLength": TITLE_MAX_CHARS },
                        "description": { "type": "string", "maxLength": DESCRIPTION_MAX_CHARS, "default": "" },
                        "done": { "type": "boolean", "default": false }
                    }
                },
                "Error": {
                    "type": "object",
                    "required": ["detail"],
                    "properties": { "detail": { "type": "string" } }
                }
            }
        }
    })
}

pub async fn openapi(State(settings): State<Arc<Settings>>) -> Json<Value> {
    Json(openapi_document(&settings))
}

pub fn openapi_url(settings: &Settings) -> String {
    format!("{}/openapi.json", settings.api_prefix)
}

pub fn swagger_ui_html(settings: &Settings) -> String {
    let title = escape_html(&settings.project_name);
    let url = escape_html(&openapi_url(settings));
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<link type="text/css" rel="stylesheet" href="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui.css">
<title>{title} - Swagger UI</title>
</head>
<body>
<div id="swagger-ui">
</div>
<script src="https://cdn.jsdelivr.net/npm/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
<script>
const ui = SwaggerUIBundle({{
    url: '{url}',
    dom_id: '#swagger-ui',
    layout: 'BaseLayout',
    deepLinking: true,
    showExtensions: true,
    showCommonExtensions: true,
    presets: [
        SwaggerUIBundle.presets.apis,
        SwaggerUIBundle.SwaggerUIStandalonePreset
    ],
}})
</script>
</body>
</html>
"#
    )
}

pub fn redoc_html(settings: &Settings) -> String {
    let title = escape_html(&settings.project_name);
    let url = escape_html(&openapi_url(settings));
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
<title>{title} - ReDoc</title>
<meta charset="utf-8"/>
<meta name="viewport" content="width=device-width, initial-scale=1">
<link href="https://fonts.googleapis.com/css?family=Montserrat:300,400,700|Roboto:300,400,700" rel="stylesheet">
<style>
  body {{
    margin: 0;
    padding: 0;
  }}
</style>
</head>
<body>
<noscript>
    ReDoc requires Javascript to function. Please enable it to browse the documentation.
</noscript>
<redoc spec-url="{url}"></redoc>
<script src="https://cdn.jsdelivr.net/npm/redoc@2/bundles/redoc.standalone.js"> </script>
</body>
</html>
"#
    )
}

pub async fn swagger_ui(State(settings): State<Arc<Settings>>) -> Html<String> {
    Html(swagger_ui_html(&settings))
}

pub async fn redoc(State(settings): State<Arc<Settings>>) -> Html<String> {
    Html(redoc_html(&settings))
}

// project names come from the environment and end up inside markup
fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}
