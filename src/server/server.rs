//! HTTP server core implementation
//!
//! This module provides the HttpServer struct and its core methods.

use crate::config::{Config, OutputMode, ServerConfig};
use crate::server::handlers::health_check;
use crate::server::routes;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer, http::Method, middleware::DefaultHeaders, web,
};
use tracing::info;
use tracing_actix_web::TracingLogger;

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");
        let state = AppState::from_config(config.clone()).await?;
        Ok(Self::with_state(state))
    }

    /// Create a server around prepared state
    pub fn with_state(state: AppState) -> Self {
        Self {
            config: state.config.gateway.server.clone(),
            state,
        }
    }

    /// Create the Actix-web application
    pub fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let server_config = &state.config.gateway.server;
        let cors = Self::build_cors(server_config);
        let max_body_size = server_config.max_body_size;

        let output = state.config.output().clone();

        App::new()
            .app_data(state)
            .app_data(web::PayloadConfig::new(max_body_size))
            .app_data(routes::json_config(max_body_size))
            .wrap(cors)
            .wrap(TracingLogger::default())
            .wrap(DefaultHeaders::new().add(("Server", "gemini-image-gateway")))
            .route("/health", web::get().to(health_check))
            .configure(routes::configure_routes)
            .configure(move |cfg| {
                if output.mode == OutputMode::Disk {
                    cfg.service(actix_files::Files::new(&output.public_path, &output.dir));
                }
            })
    }

    fn build_cors(config: &ServerConfig) -> Cors {
        let cors_config = &config.cors;
        if !cors_config.enabled {
            return Cors::default();
        }

        let mut cors = Cors::default()
            .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
            .allow_any_header()
            .max_age(cors_config.max_age);

        if cors_config.allows_all_origins() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_config.allowed_origins {
                cors = cors.allowed_origin(origin);
            }
        }
        cors
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = self.config.address();
        let port = self.config.port;

        info!("Starting HTTP server on {}", bind_addr);

        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()));
        if let Some(workers) = self.config.workers {
            server = server.workers(workers);
        }

        let server = server
            .bind(&bind_addr)
            .map_err(|e| Self::format_bind_error(e, &bind_addr, port))?
            .run();

        info!("HTTP server listening on {}", bind_addr);

        server
            .await
            .map_err(|e| GatewayError::internal(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }
}
