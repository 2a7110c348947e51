//! API server initialization

use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use super::auth::{AuthManager, AuthState, require_auth};
use super::embedded;
use super::middleware::{self, AllowedOrigins};
use super::openapi::openapi_json;
use super::routes::{actions, auth, challenges, dashboard, habits, health, ranking};
use crate::core::CoreApp;
use crate::core::constants::{AUTH_BODY_LIMIT, DEFAULT_BODY_LIMIT};
use crate::data::TransactionalService;
use crate::domain::{
    AccountService, ChallengeService, DashboardService, HabitService, RankingService,
};

/// Assemble the HTTP application: `/api` routes plus the embedded PWA shell
pub fn build_router(
    database: Arc<TransactionalService>,
    auth_manager: Arc<AuthManager>,
    allowed_origins: &AllowedOrigins,
) -> Router {
    let accounts = Arc::new(AccountService::new(database.clone(), auth_manager.clone()));
    let auth_routes = auth::routes(accounts).layer(DefaultBodyLimit::max(AUTH_BODY_LIMIT));

    // Everything below requires a bearer session
    let protected_routes = Router::new()
        .merge(dashboard::routes(Arc::new(DashboardService::new(
            database.clone(),
        ))))
        .merge(actions::routes())
        .merge(habits::routes(Arc::new(HabitService::new(database.clone()))))
        .merge(challenges::routes(Arc::new(ChallengeService::new(
            database.clone(),
        ))))
        .merge(ranking::routes(Arc::new(RankingService::new(
            database.clone(),
        ))))
        .route_layer(from_fn_with_state(
            AuthState {
                auth_manager,
                database,
            },
            require_auth,
        ));

    let api_routes = Router::new()
        .route("/health", get(health::health))
        .route("/openapi.json", get(openapi_json))
        .merge(auth_routes)
        .merge(protected_routes)
        .fallback(middleware::handle_404);

    Router::new()
        .nest("/api", api_routes)
        .fallback(embedded::serve_assets)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Serve until shutdown is triggered; returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let router = build_router(app.database.clone(), app.auth.clone(), &allowed_origins);

        let host = app.config.server.host.clone();
        let port = app.config.server.port;
        let listener = TcpListener::bind((host.as_str(), port)).await?;
        tracing::debug!(addr = %listener.local_addr()?, "HTTP server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(app.shutdown.wait())
            .await?;

        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use chrono::Utc;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn app() -> Router {
        let database = TransactionalService::in_memory().await;
        ChallengeService::new(database.clone())
            .seed_defaults(Utc::now().date_naive())
            .await
            .unwrap();
        let auth_manager = Arc::new(AuthManager::new(vec![9u8; 32], 30));
        build_router(
            database,
            auth_manager,
            &AllowedOrigins::new("127.0.0.1", 5000),
        )
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn register(app: &Router, email: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/register",
            None,
            Some(json!({"email": email, "password": "secreto"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Registro exitoso");
        body["token"].as_str().unwrap().to_string()
    }

    async fn log_habit(app: &Router, token: &str, action: &str) -> (StatusCode, Value) {
        send(
            app,
            Method::POST,
            "/api/habits",
            Some(token),
            Some(json!({"action": action})),
        )
        .await
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_openapi_is_public() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["info"]["title"], "EcoTrack API");
    }

    #[tokio::test]
    async fn test_protected_routes_require_token() {
        let app = app().await;
        for (method, uri) in [
            (Method::GET, "/api/dashboard"),
            (Method::GET, "/api/actions"),
            (Method::GET, "/api/challenges"),
            (Method::GET, "/api/ranking"),
        ] {
            let (status, body) = send(&app, method, uri, None, None).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
            assert_eq!(body["code"], "AUTH_REQUIRED");
        }
    }

    #[tokio::test]
    async fn test_register_and_login() {
        let app = app().await;
        register(&app, "ana@example.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/register",
            None,
            Some(json!({"email": "ana@example.com", "password": "otra"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "El correo electrónico ya está registrado.");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": "ana@example.com", "password": "secreto"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Inicio de sesión exitoso");
        let token = body["token"].as_str().unwrap();

        let (status, body) = send(&app, Method::GET, "/api/dashboard", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["user"]["username"], "ana");
    }

    #[tokio::test]
    async fn test_login_rejections() {
        let app = app().await;
        register(&app, "ana@example.com").await;

        for credentials in [
            json!({"email": "ana@example.com", "password": "mal"}),
            json!({"email": "nadie@example.com", "password": "secreto"}),
        ] {
            let (status, body) =
                send(&app, Method::POST, "/api/login", None, Some(credentials)).await;
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(body["message"], "Credenciales inválidas.");
        }

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/login",
            None,
            Some(json!({"email": "ana@example.com"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Faltan campos (email, password)");
    }

    #[tokio::test]
    async fn test_habit_scoring_and_validation() {
        let app = app().await;
        let token = register(&app, "ana@example.com").await;

        let (status, body) = log_habit(&app, &token, "Usar bicicleta").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Hábito registrado con éxito");
        assert_eq!(body["points"], 25);
        assert_eq!(body["co2"], 1.5);

        let (status, body) = log_habit(&app, &token, "Plantar un árbol").await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["points"], 2);

        let (status, body) = log_habit(&app, &token, "  ").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/habits",
            Some(&token),
            Some(json!({"action": "Apagar luces", "date": "14/03/2026"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "La fecha debe tener el formato AAAA-MM-DD.");

        let (status, body) = send(&app, Method::GET, "/api/dashboard", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["actions"], 2);
        assert_eq!(body["summary"]["points"], 27);
        assert_eq!(body["progress_chart"].as_array().unwrap().len(), 7);
        assert_eq!(body["achievements"][0]["unlocked"], true);
        assert_eq!(body["achievements"][1]["unlocked"], false);
    }

    #[tokio::test]
    async fn test_malformed_json_rejected() {
        let app = app().await;
        let token = register(&app, "ana@example.com").await;
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/habits")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_recycling_challenge_flow() {
        let app = app().await;
        let token = register(&app, "ana@example.com").await;

        let (_, challenges) = send(&app, Method::GET, "/api/challenges", Some(&token), None).await;
        let recycling = challenges
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["target_type"] == "Reciclar plástico")
            .unwrap()
            .clone();
        let id = recycling["id"].as_i64().unwrap();
        assert_eq!(recycling["progress"], 0);
        assert_eq!(recycling["completed"], 0);
        assert_eq!(recycling["percentage"], 0);

        let complete = json!({"challenge_id": id});
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/challenges/complete",
            Some(&token),
            Some(complete.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "PRECONDITION_FAILED");

        for _ in 0..3 {
            log_habit(&app, &token, "Reciclar plástico").await;
        }

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/challenges/complete",
            Some(&token),
            Some(complete.clone()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["points"], 50);
        assert_eq!(
            body["message"],
            "¡Reto completado! Has ganado 50 puntos verdes."
        );

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/challenges/complete",
            Some(&token),
            Some(complete),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "ALREADY_COMPLETED");

        let (_, challenges) = send(&app, Method::GET, "/api/challenges", Some(&token), None).await;
        let recycling = challenges
            .as_array()
            .unwrap()
            .iter()
            .find(|c| c["id"] == id)
            .unwrap()
            .clone();
        assert_eq!(recycling["completed"], 1);
        assert_eq!(recycling["percentage"], 100);

        let (_, dashboard) = send(&app, Method::GET, "/api/dashboard", Some(&token), None).await;
        assert_eq!(dashboard["user"]["points"], 3 * 10 + 50);
    }

    #[tokio::test]
    async fn test_unknown_challenge() {
        let app = app().await;
        let token = register(&app, "ana@example.com").await;
        let (status, body) = send(
            &app,
            Method::POST,
            "/api/challenges/complete",
            Some(&token),
            Some(json!({"challenge_id": 999})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Reto no encontrado.");
    }

    #[tokio::test]
    async fn test_ranking_orders_by_points() {
        let app = app().await;
        let ana = register(&app, "ana@example.com").await;
        let luis = register(&app, "luis@example.com").await;
        log_habit(&app, &luis, "Usar bicicleta").await;
        log_habit(&app, &ana, "Apagar luces").await;

        let (status, body) = send(&app, Method::GET, "/api/ranking", Some(&ana), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ranking"][0]["username"], "luis");
        assert_eq!(body["ranking"][0]["position"], 1);
        assert_eq!(body["ranking"][1]["username"], "ana");
        assert_eq!(body["personal_rank"]["rank"], 2);
        assert_eq!(body["personal_rank"]["points"], 4);
    }

    #[tokio::test]
    async fn test_actions_catalogue() {
        let app = app().await;
        let token = register(&app, "ana@example.com").await;
        let (status, body) = send(&app, Method::GET, "/api/actions", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let actions = body.as_array().unwrap();
        assert_eq!(actions.len(), 6);
        assert_eq!(actions[0]["action"], "Reciclar plástico");
    }

    #[tokio::test]
    async fn test_unknown_api_route_is_json_404() {
        let app = app().await;
        let (status, body) = send(&app, Method::GET, "/api/nothing", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_static_shell_allow_list() {
        let app = app().await;
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(Request::builder().uri("/models.py").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
