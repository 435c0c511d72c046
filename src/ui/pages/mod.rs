pub mod customers;
pub mod dashboard;
pub mod login;
pub mod order_new;
pub mod orders;
pub mod payments;
pub mod products;
pub mod settings;

pub use customers::CustomersPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use order_new::OrderNewPage;
pub use orders::OrdersPage;
pub use payments::PaymentsPage;
pub use products::ProductsPage;
pub use settings::SettingsPage;
