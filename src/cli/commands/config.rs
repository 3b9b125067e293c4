use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;

pub fn handle(config: &AppConfig, output_format: OutputFormat) -> anyhow::Result<()> {
    let shown = config.redacted();

    match output_format {
        OutputFormat::Json => output_success(
            output_format,
            "Resolved configuration",
            Some(serde_json::to_value(&shown)?),
        ),
        OutputFormat::Text => {
            println!("Environment:      {:?}", shown.environment);
            match shown.resolve_base() {
                Ok(base) => println!("Backend base:     {}", base),
                Err(e) => println!("Backend base:     <missing> ({})", e),
            }
            println!("Listen port:      {}", shown.server.port);
            println!("Upstream timeout: {}s (connect {}s)", shown.upstream.timeout_secs, shown.upstream.connect_timeout_secs);
            println!("Auth cookies:     {}", shown.auth.cookie_names.join(", "));
            println!("Admin API key:    {}", shown.auth.admin_api_key.as_deref().unwrap_or("<none>"));
            println!("API key:          {} ({})", shown.auth.api_key.as_deref().unwrap_or("<none>"), shown.auth.api_key_header);
            println!("Forward cookies:  {}", shown.auth.forward_cookies);
            println!("Login path:       {}", shown.security.login_path);
            println!("Protected pages:  {}", shown.security.protected_prefixes.join(", "));
            println!("CORS origins:     {}", shown.security.cors_origins.join(", "));
            Ok(())
        }
    }
}
