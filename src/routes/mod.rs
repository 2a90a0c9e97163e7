pub mod auth;

pub mod cathedras;

pub mod persons;

pub mod courses;

pub mod enrollments;

pub mod imports;

pub use auth::configure_auth_routes;
pub use cathedras::configure_cathedras_routes;
pub use courses::configure_courses_routes;
pub use enrollments::configure_enrollments_routes;
pub use imports::configure_imports_routes;
pub use persons::configure_persons_routes;
