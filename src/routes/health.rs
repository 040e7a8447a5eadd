use poem::handler;

#[handler]
pub async fn health_check() {}
