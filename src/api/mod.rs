/// Builds the full application around `pool` for handler tests.
#[cfg(test)]
macro_rules! test_app {
    ($pool:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($pool))
                .configure(crate::routes::configure),
        )
    };
}

#[cfg(test)]
pub(crate) use test_app;

pub mod attendance;
pub mod member;
