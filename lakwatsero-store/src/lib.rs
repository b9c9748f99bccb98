pub mod account_repo;
pub mod app_config;
pub mod booking_repo;
pub mod flight_repo;
pub mod http_client;
pub mod payment_repo;

pub use account_repo::HttpAccountDirectory;
pub use booking_repo::HttpBookingService;
pub use flight_repo::HttpFlightProvider;
pub use http_client::ApiClient;
pub use payment_repo::HttpPaymentGateway;
