use server::{
    config::Config,
    handlers::{connection, Context},
};
use warp::Filter;

#[tokio::main]
async fn main() {
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;
    log::info!("starting on port {port}");

    let ctx = Context::new(config);

    server::timers::spawn_turn_timer(ctx.clone());
    server::timers::spawn_idle_sweep(ctx.clone());

    let ctx_filter = warp::any().map(move || ctx.clone());

    let live = warp::path("live")
        .and(warp::ws())
        .and(ctx_filter)
        .and(warp::header::optional::<String>("origin"))
        .map(|ws: warp::ws::Ws, ctx: Context, origin: Option<String>| {
            ws.on_upgrade(move |socket| async move {
                if let Some(expected) = &ctx.config.origin {
                    if origin.as_deref() != Some(expected.as_str()) {
                        log::warn!("rejecting connection: origin {origin:?} != {expected}");
                        return;
                    }
                }
                connection::accept(socket, ctx).await;
            })
        });

    warp::serve(live).run(([0, 0, 0, 0], port)).await;
}
