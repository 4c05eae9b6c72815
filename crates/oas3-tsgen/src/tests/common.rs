use serde_json::{Value, json};

use crate::{
  config::{Config, ConfigFile, DEFAULT_CONFIG, Stubs},
  generator::document::SchemaDocument,
};

pub(crate) const TEST_ALIAS: &str = "app";

pub(crate) fn default_config() -> Config {
  Config::from_toml(DEFAULT_CONFIG, TEST_ALIAS).unwrap()
}

/// The bundled config with a tweak applied to its parsed file.
pub(crate) fn config_with(tweak: impl FnOnce(&mut ConfigFile)) -> Config {
  let mut file = ConfigFile::from_toml(DEFAULT_CONFIG).unwrap();
  tweak(&mut file);
  Config::new(file, TEST_ALIAS, Stubs::builtin()).unwrap()
}

pub(crate) fn users_document() -> SchemaDocument {
  SchemaDocument::new(users_spec())
}

/// A small JSON:API flavoured document with two modules, a relation of each cardinality and a
/// handful of entries the generators are expected to skip.
pub(crate) fn users_spec() -> Value {
  json!({
    "openapi": "3.0.0",
    "info": { "title": "Users", "version": "1.0.0" },
    "paths": {
      "/users/{id}": {
        "parameters": [{ "name": "id", "in": "path", "required": true }],
        "get": {
          "operationId": "getUser",
          "x-modules": ["users"],
          "responses": {
            "200": {
              "content": {
                "application/json": {
                  "schema": {
                    "allOf": [
                      { "$ref": "#/components/schemas/Envelope" },
                      { "properties": { "data": { "$ref": "#/components/schemas/UserResource" } } }
                    ]
                  }
                }
              }
            }
          }
        },
        "delete": {
          "operationId": "users.delete",
          "x-modules": ["users"],
          "responses": { "204": { "description": "Deleted" } }
        }
      },
      "/users": {
        "get": {
          "operationId": "listUsers",
          "x-modules": ["users"],
          "responses": { "200": { "$ref": "#/components/responses/UserList" } }
        },
        "post": {
          "operationId": "createUser",
          "x-modules": ["users", "admin"],
          "responses": { "201": { "description": "Created" } }
        }
      },
      "/teams": {
        "get": {
          "operationId": "listTeams",
          "x-modules": ["teams"],
          "responses": {
            "200": { "content": { "application/json": { "schema": { "type": "array", "items": {} } } } }
          }
        }
      }
    },
    "components": {
      "responses": {
        "UserList": {
          "content": {
            "application/json": {
              "schema": {
                "allOf": [{ "properties": { "data": { "$ref": "#/components/schemas/UserCollection" } } }]
              }
            }
          }
        }
      },
      "schemas": {
        "Envelope": { "type": "object" },
        "UserResource": {
          "type": "object",
          "x-module": "users",
          "properties": {
            "type": { "type": "string", "default": "users" },
            "attributes": { "$ref": "#/components/schemas/UserAttributes" },
            "relationships": {
              "type": "object",
              "properties": {
                "team": {
                  "properties": {
                    "data": {
                      "anyOf": [{ "type": "null" }, { "$ref": "#/components/schemas/TeamIdentifier" }]
                    }
                  }
                },
                "tags": {
                  "properties": {
                    "data": {
                      "type": "array",
                      "items": { "properties": { "type": { "type": "string", "example": "tags" } } }
                    }
                  }
                },
                "owner": { "properties": { "data": { "type": "object" } } }
              }
            }
          }
        },
        "UserAttributes": {
          "type": "object",
          "required": ["name"],
          "properties": {
            "name": { "type": "string", "x-module": "users" },
            "age": { "type": "integer", "x-module": "users" },
            "birthday": { "$ref": "#/components/schemas/Date", "x-module": "users" },
            "status": { "type": "string", "enum": ["active", "on_hold"], "x-module": "users" },
            "internal_note": { "type": "string", "x-module": "admin" }
          }
        },
        "TeamIdentifier": {
          "type": "object",
          "properties": { "type": { "type": "string", "enum": ["teams"] } }
        },
        "TeamResource": {
          "type": "object",
          "x-module": "teams",
          "properties": { "type": { "type": "string", "default": "teams" } }
        },
        "OrphanResource": {
          "type": "object",
          "properties": { "type": { "type": "string", "default": "orphans" } }
        },
        "UntypedResource": { "type": "object", "x-module": "users" },
        "Date": { "type": "string", "format": "date" }
      }
    }
  })
}
