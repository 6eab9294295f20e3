use crate::frontend::{
    api::{GatewayClient, GatewayConfig, GATEWAY_BUCKET_META, GATEWAY_KEY_META, GATEWAY_URL_META},
    components::{auth_prompt::AuthPrompt, error_popup::ErrorPopup, nav::Nav},
    pages::{
        auth_callback::AuthCallback,
        categories::Categories,
        create_category::CreateCategory,
        create_post::CreatePost,
        home::Home,
        post::PostDetail,
    },
    session::Session,
};
use leptos::prelude::*;
use leptos_meta::{provide_meta_context, MetaTags, Stylesheet, Title};
use leptos_router::{
    components::{Route, Router, Routes},
    path,
};

/// Html document rendered on the server. The gateway settings are passed to the browser
/// as meta tags.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    let gateway = use_context::<GatewayConfig>().unwrap_or_default();
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <meta name=GATEWAY_URL_META content=gateway.url />
                <meta name=GATEWAY_KEY_META content=gateway.anon_key />
                <meta name=GATEWAY_BUCKET_META content=gateway.image_bucket />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

#[cfg(feature = "ssr")]
fn gateway_config() -> GatewayConfig {
    use_context::<GatewayConfig>().unwrap_or_default()
}

#[cfg(not(feature = "ssr"))]
fn gateway_config() -> GatewayConfig {
    GatewayConfig::from_document().unwrap_or_else(|e| {
        log::error!("{e}");
        GatewayConfig::default()
    })
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();
    let client = GatewayClient::new(gateway_config());
    provide_context(client.clone());
    provide_context(Session::init(client));
    let (error_popup, set_error_popup) = signal(None::<String>);
    provide_context(set_error_popup);

    view! {
        <Stylesheet id="resep" href="/pkg/resep.css" />
        <Title formatter=|text: String| format!("{text} - Resep") />
        <Router>
            <Nav />
            <main class="p-4 mx-auto max-w-5xl">
                <Routes fallback=|| view! { <p class="my-8 text-center">"Page not found."</p> }>
                    <Route path=path!("/") view=Home />
                    <Route path=path!("/post/:id") view=PostDetail />
                    <Route path=path!("/create") view=CreatePost />
                    <Route path=path!("/categories") view=Categories />
                    <Route path=path!("/category/create") view=CreateCategory />
                    <Route path=path!("/auth/callback") view=AuthCallback />
                </Routes>
            </main>
            <AuthPrompt />
            <ErrorPopup message=error_popup set_message=set_error_popup />
        </Router>
    }
}
