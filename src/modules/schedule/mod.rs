pub mod models;
pub mod scheduler;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::json;
use time::{OffsetDateTime, PrimitiveDateTime};

use bookdesk_http::error::AppError;
use bookdesk_kernel::{InitCtx, Module};

use crate::modules::books::cache::CatalogCache;

use models::{AppointmentView, CreateScheduleRequest, ScheduleListResponse};
use scheduler::{AppointmentScheduler, ScheduleError};
use store::ScheduleStore;

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        let message = err.to_string();
        match err {
            ScheduleError::InvalidPayload => AppError::invalid_payload(message),
            ScheduleError::InvalidDateFormat => AppError::invalid_date_format(message),
            ScheduleError::PastDate => AppError::past_date(message),
            ScheduleError::BookNotFound(_) => AppError::not_found("book_not_found", message),
            ScheduleError::Source(source) => source.into(),
        }
    }
}

#[derive(Clone)]
struct ScheduleState {
    scheduler: Arc<AppointmentScheduler>,
    store: Arc<ScheduleStore>,
}

/// Schedule module: pickup slot booking and the upcoming projection.
pub struct ScheduleModule {
    state: ScheduleState,
}

impl ScheduleModule {
    pub fn new(cache: Arc<CatalogCache>, store: Arc<ScheduleStore>) -> Self {
        Self {
            state: ScheduleState {
                scheduler: Arc::new(AppointmentScheduler::new(cache, store.clone())),
                store,
            },
        }
    }
}

#[async_trait]
impl Module for ScheduleModule {
    fn name(&self) -> &'static str {
        "schedule"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            "schedule module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/", get(list_schedules).post(create_schedule))
            .with_state(self.state.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List upcoming pickup appointments",
                        "tags": ["Schedule"],
                        "responses": {
                            "200": {
                                "description": "Appointments with a pickup time after now",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "object",
                                            "properties": {
                                                "schedules": {
                                                    "type": "array",
                                                    "items": {
                                                        "$ref": "#/components/schemas/Appointment"
                                                    }
                                                }
                                            },
                                            "required": ["schedules"]
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Book a pickup slot for a catalog book",
                        "tags": ["Schedule"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": {
                                        "type": "object",
                                        "properties": {
                                            "book_id": { "type": "integer" },
                                            "time": {
                                                "type": "string",
                                                "description": "YYYY-MM-DD HH:MM:SS"
                                            }
                                        },
                                        "required": ["book_id", "time"]
                                    }
                                }
                            }
                        },
                        "responses": {
                            "201": {
                                "description": "Created appointment",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/Appointment"
                                        }
                                    }
                                }
                            },
                            "400": {
                                "description": "Invalid payload, time format, or past pickup time",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
                                        }
                                    }
                                }
                            },
                            "404": {
                                "description": "No book with the given id",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "$ref": "#/components/schemas/ErrorResponse"
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
                }
            },
            "components": {
                "schemas": {
                    "Appointment": {
                        "type": "object",
                        "properties": {
                            "id": { "type": "string", "format": "uuid" },
                            "book_id": { "type": "integer" },
                            "book_title": { "type": "string" },
                            "book_authors": { "type": "string" },
                            "book_edition_number": { "type": "string", "nullable": true },
                            "book_publish_year": { "type": "integer", "nullable": true },
                            "pickup_time": {
                                "type": "string",
                                "description": "YYYY-MM-DD HH:MM:SS"
                            }
                        },
                        "required": ["id", "book_id", "book_title", "book_authors", "pickup_time"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "schedule module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "schedule module stopped");
        Ok(())
    }
}

/// Current wall-clock time as a naive timestamp, matching the request
/// time format's resolution
fn now() -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc();
    PrimitiveDateTime::new(now.date(), now.time())
}

/// List appointments with a pickup time after now
async fn list_schedules(State(state): State<ScheduleState>) -> Json<ScheduleListResponse> {
    let schedules = state
        .store
        .list_upcoming(now())
        .iter()
        .map(AppointmentView::from)
        .collect();

    Json(ScheduleListResponse { schedules })
}

/// Book a pickup slot
async fn create_schedule(
    State(state): State<ScheduleState>,
    Json(request): Json<CreateScheduleRequest>,
) -> Result<(StatusCode, Json<AppointmentView>), AppError> {
    let appointment = state
        .scheduler
        .schedule(request.book_id, request.time.as_deref(), now())
        .await?;

    Ok((StatusCode::CREATED, Json(AppointmentView::from(&appointment))))
}

/// Create a new instance of the schedule module
pub fn create_module(cache: Arc<CatalogCache>, store: Arc<ScheduleStore>) -> Arc<dyn Module> {
    Arc::new(ScheduleModule::new(cache, store))
}
