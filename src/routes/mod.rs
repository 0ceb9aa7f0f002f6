use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::services::ServeDir;

use crate::{
    handlers::{activity, auth, day_trip, event, program, service, statistics, website, wedding},
    state::AppState,
    utils::jwt::{admin_middleware, auth_middleware},
};

// Límite generoso para los formularios multipart con imágenes
const MAX_MULTIPART_BYTES: usize = 104_857_600; // 100 MB

pub fn create_routes(state: AppState) -> Router {
    // 1. Rutas del panel sin token (login y recuperación de contraseña)
    let dashboard_public = Router::new()
        .route("/api/dashboard/login", post(auth::login_handler))
        .route("/api/dashboard/logout", post(auth::logout_handler))
        .route(
            "/api/dashboard/forgotpasswordOwner",
            post(auth::forgot_password_handler),
        )
        .route(
            "/api/dashboard/resetpasswordOwner",
            post(auth::reset_password_handler),
        )
        .route(
            "/api/dashboard/statistics",
            get(statistics::get_statistics_handler),
        );

    // 2. Rutas del panel con token (gestión de contenido)
    let dashboard_auth = Router::new()
        .route("/api/dashboard/addProgram", post(program::add_program_handler))
        .route(
            "/api/dashboard/updateProgram/:id",
            put(program::update_program_handler),
        )
        .route(
            "/api/dashboard/deleteProgram/:id",
            delete(program::delete_program_handler),
        )
        .route(
            "/api/dashboard/getAllPrograms",
            get(program::get_all_programs_handler),
        )
        .route(
            "/api/dashboard/getProgramById/:id",
            get(program::get_program_by_id_handler),
        )
        .route(
            "/api/dashboard/addDayTrip",
            post(day_trip::add_day_trip_handler),
        )
        .route(
            "/api/dashboard/updateDayTrip/:id",
            put(day_trip::update_day_trip_handler),
        )
        .route(
            "/api/dashboard/deleteDayTrip/:id",
            delete(day_trip::delete_day_trip_handler),
        )
        .route(
            "/api/dashboard/getAllDayTrips",
            get(day_trip::get_all_day_trips_handler),
        )
        .route(
            "/api/dashboard/getDayTripById/:id",
            get(day_trip::get_day_trip_by_id_handler),
        )
        .route(
            "/api/dashboard/addWedding",
            post(wedding::add_wedding_handler),
        )
        .route(
            "/api/dashboard/updateWedding/:id",
            put(wedding::update_wedding_handler),
        )
        .route(
            "/api/dashboard/deleteWedding/:id",
            delete(wedding::delete_wedding_handler),
        )
        .route(
            "/api/dashboard/getAllWeddings",
            get(wedding::get_all_weddings_handler),
        )
        .route(
            "/api/dashboard/getWeddingById/:id",
            get(wedding::get_wedding_by_id_handler),
        )
        .route("/api/dashboard/addEvent", post(event::add_event_handler))
        .route(
            "/api/dashboard/updateEvent/:id",
            put(event::update_event_handler),
        )
        .route(
            "/api/dashboard/deleteEvent/:id",
            delete(event::delete_event_handler),
        )
        .route(
            "/api/dashboard/getAllEvents",
            get(event::get_all_events_handler),
        )
        .route(
            "/api/dashboard/getEventById/:id",
            get(event::get_event_by_id_handler),
        )
        .route(
            "/api/dashboard/addActivity",
            post(activity::add_activity_handler),
        )
        .route(
            "/api/dashboard/updateActivity/:id",
            put(activity::update_activity_handler),
        )
        .route(
            "/api/dashboard/deleteActivity/:id",
            delete(activity::delete_activity_handler),
        )
        .route(
            "/api/dashboard/getAllActivities",
            get(activity::get_all_activities_handler),
        )
        .route(
            "/api/dashboard/getActivityById/:id",
            get(activity::get_activity_by_id_handler),
        )
        .route(
            "/api/dashboard/addService",
            post(service::add_service_handler),
        )
        .route(
            "/api/dashboard/updateService/:id",
            put(service::update_service_handler),
        )
        .route(
            "/api/dashboard/deleteService/:id",
            delete(service::delete_service_handler),
        )
        .route(
            "/api/dashboard/getAllServices",
            get(service::get_all_services_handler),
        )
        .route(
            "/api/dashboard/getServiceById/:id",
            get(service::get_service_by_id_handler),
        )
        .route_layer(middleware::from_fn(auth_middleware));

    // 3. Rutas de ADMIN (gestión de usuarios)
    let dashboard_admin = Router::new()
        .route("/api/dashboard/addUser", post(auth::add_user_handler))
        .route(
            "/api/dashboard/getAllUsers",
            get(auth::get_all_users_handler),
        )
        .route(
            "/api/dashboard/deleteUser/:id",
            delete(auth::delete_user_handler),
        )
        .route_layer(middleware::from_fn(admin_middleware));

    // 4. Sitio público (solo lecturas + formulario de contacto)
    let website = Router::new()
        .route("/api/website/send", post(website::send_contact_email_handler))
        .route(
            "/api/website/getMainProgram",
            get(website::get_main_program_handler),
        )
        .route(
            "/api/website/getAllPrograms",
            get(website::get_all_programs_handler),
        )
        .route(
            "/api/website/getAllProgramSummaries",
            get(website::get_all_program_summaries_handler),
        )
        .route(
            "/api/website/getProgramById/:id",
            get(website::get_program_by_id_handler),
        )
        .route(
            "/api/website/getSimilarPrograms",
            get(website::get_similar_programs_handler),
        )
        .route(
            "/api/website/getAllDayTrips",
            get(website::get_all_day_trips_handler),
        )
        .route(
            "/api/website/getDayTripSummaries",
            get(website::get_day_trip_summaries_handler),
        )
        .route(
            "/api/website/getDayTripById/:id",
            get(website::get_day_trip_by_id_handler),
        )
        .route(
            "/api/website/getSimilarDayTrips",
            get(website::get_similar_day_trips_handler),
        )
        .route(
            "/api/website/getAllDayTripCities",
            get(website::get_all_day_trip_cities_handler),
        )
        .route(
            "/api/website/getDayTripsByCity",
            get(website::get_day_trips_by_city_handler),
        )
        .route(
            "/api/website/getAllServices",
            get(website::get_all_services_handler),
        )
        .route(
            "/api/website/getAllActivities",
            get(website::get_all_activities_handler),
        )
        .route(
            "/api/website/getAllEvents",
            get(website::get_all_events_handler),
        )
        .route(
            "/api/website/getAllWeddings",
            get(website::get_all_weddings_handler),
        );

    let serve_uploads = ServeDir::new(state.files.root().to_path_buf());

    // Fusionamos todo
    Router::new()
        .merge(dashboard_public)
        .merge(dashboard_auth)
        .merge(dashboard_admin)
        .merge(website)
        .nest_service("/uploads", serve_uploads)
        .layer(DefaultBodyLimit::max(MAX_MULTIPART_BYTES))
        .with_state(state)
}
