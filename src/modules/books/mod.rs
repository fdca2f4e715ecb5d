pub mod builder;
pub mod cache;
pub mod models;
pub mod offline;
pub mod query;
pub mod source;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde_json::json;

use bookdesk_http::error::AppError;
use bookdesk_kernel::{InitCtx, Module};

use cache::CatalogCache;
use models::{BookFilter, BookListResponse, GenreListResponse, GENRES};
use source::FetchError;

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        AppError::upstream_unavailable(err.to_string())
    }
}

/// Books module: genre vocabulary and catalog query endpoints.
pub struct BooksModule {
    cache: Arc<CatalogCache>,
}

impl BooksModule {
    pub fn new(cache: Arc<CatalogCache>) -> Self {
        Self { cache }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_books))
            .route("/genres", get(list_genres))
            .with_state(self.cache.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books, optionally filtered by genre, author, or title",
                        "tags": ["Books"],
                        "parameters": [
                            {
                                "name": "genre",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string", "enum": GENRES }
                            },
                            {
                                "name": "author",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "title",
                                "in": "query",
                                "required": false,
                                "schema": { "type": "string" }
                            }
                        ],
                        "responses": {
                            "200": {
                                "description": "Filtered book list with echoed filter values",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/BookList"
                                        }
                                    }
                                }
                            },
                            "503": {
                                "description": "Subject listing source unavailable",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            }
                        }
                    }
                },
                "/genres": {
                    "get": {
                        "summary": "List the genre vocabulary",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Ordered genre vocabulary",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "genres": {
                                                    "type": "array",
                                                    "items": { "type": "string" }
                                                }
                                            },
                                            "required": ["genres"]
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "description": "Dense local identifier, assigned at catalog build"
                            },
                            "title": { "type": "string" },
                            "authors": {
                                "type": "string",
                                "description": "Primary author name"
                            },
                            "edition_number": { "type": "string", "nullable": true },
                            "publish_year": { "type": "integer", "nullable": true },
                            "genre": {
                                "type": "array",
                                "items": { "type": "string" }
                            }
                        },
                        "required": ["id", "title", "authors", "genre"]
                    },
                    "BookList": {
                        "type": "object",
                        "properties": {
                            "genre": { "type": "string" },
                            "author": { "type": "string" },
                            "title": { "type": "string" },
                            "books": {
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/Book" }
                            }
                        },
                        "required": ["genre", "author", "title", "books"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// List the fixed genre vocabulary
async fn list_genres() -> Json<GenreListResponse> {
    Json(GenreListResponse {
        genres: GENRES.iter().map(|g| g.to_string()).collect(),
    })
}

/// List catalog books, applying the optional filter predicates
async fn list_books(
    State(cache): State<Arc<CatalogCache>>,
    Query(predicate): Query<BookFilter>,
) -> Result<Json<BookListResponse>, AppError> {
    let catalog = cache.get().await?;
    let books = query::filter(&catalog, &predicate)
        .into_iter()
        .cloned()
        .collect();

    let echo = |field: &Option<String>| field.clone().unwrap_or_else(|| "all".to_string());

    Ok(Json(BookListResponse {
        genre: echo(&predicate.genre),
        author: echo(&predicate.author),
        title: echo(&predicate.title),
        books,
    }))
}

/// Create a new instance of the books module
pub fn create_module(cache: Arc<CatalogCache>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(cache))
}
