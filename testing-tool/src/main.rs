use anyhow::{bail, Context, Result};
use colored::*;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::io::{self, Write};

const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚚 FleetFlow Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = get_base_url()?;
    let client = Client::new();

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. ❤️  Health check");
        println!("2. 🚛 Listar vehículos");
        println!("3. 🧪 Escenario completo (registro → viaje → avería)");
        println!("4. 🚪 Salir");
        print!("{}", "Selecciona una opción (1-4): ".bright_yellow());
        io::stdout().flush()?;

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;

        let outcome = match choice.trim() {
            "1" => health_check(&client, &base_url).await,
            "2" => list_vehicles(&client, &base_url).await,
            "3" => run_scenario(&client, &base_url).await,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = outcome {
            println!("{} {:#}", "❌ Error:".bright_red().bold(), e);
        }
    }

    Ok(())
}

fn get_base_url() -> Result<String> {
    if let Ok(url) = std::env::var("FLEETFLOW_URL") {
        return Ok(url.trim_end_matches('/').to_string());
    }

    print!("{}", format!("URL del servidor [{}]: ", DEFAULT_BASE_URL).bright_yellow());
    io::stdout().flush()?;
    let mut url = String::new();
    io::stdin().read_line(&mut url)?;
    let url = url.trim();

    Ok(if url.is_empty() { DEFAULT_BASE_URL } else { url }
        .trim_end_matches('/')
        .to_string())
}

async fn health_check(client: &Client, base_url: &str) -> Result<()> {
    let url = format!("{}/health", base_url);
    let (status, body) = call(client, reqwest::Method::GET, &url, None).await?;
    expect_status("GET /health", status, StatusCode::OK, &body)?;
    println!("{}", "✅ Servidor operativo".bright_green());
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}

async fn list_vehicles(client: &Client, base_url: &str) -> Result<()> {
    let url = format!("{}/vehicles", base_url);
    let (status, body) = call(client, reqwest::Method::GET, &url, None).await?;
    expect_status("GET /vehicles", status, StatusCode::OK, &body)?;

    let vehicles = body.as_array().cloned().unwrap_or_default();
    println!("{}", format!("🚛 {} vehículos", vehicles.len()).bright_cyan().bold());
    for vehicle in vehicles {
        println!(
            "  • {} | {} | {} kg | {}",
            vehicle["id"].as_str().unwrap_or("-"),
            vehicle["name"].as_str().unwrap_or("-"),
            vehicle["capacity"],
            vehicle["status"].as_str().unwrap_or("-"),
        );
    }
    Ok(())
}

/// Registra un vehículo de 5000 kg, lo despacha con 4500 kg, comprueba que
/// un segundo despacho y una carga excesiva se rechazan y lo manda a taller.
async fn run_scenario(client: &Client, base_url: &str) -> Result<()> {
    println!();
    println!("{}", "🧪 ESCENARIO COMPLETO".bright_cyan().bold());
    println!("{}", "=====================".bright_cyan());

    let (status, vehicle) = call(
        client,
        reqwest::Method::POST,
        &format!("{}/vehicles", base_url),
        Some(json!({ "name": "APEX", "capacity": 5000 })),
    )
    .await?;
    expect_status("POST /vehicles", status, StatusCode::CREATED, &vehicle)?;
    let vehicle_id = vehicle["id"]
        .as_str()
        .context("la respuesta no contiene id")?
        .to_string();
    step("Vehículo registrado", &vehicle);

    let (status, body) = call(
        client,
        reqwest::Method::POST,
        &format!("{}/trips", base_url),
        Some(json!({ "vehicleId": vehicle_id, "cargoWeight": 5001 })),
    )
    .await?;
    expect_status("POST /trips (5001 kg)", status, StatusCode::BAD_REQUEST, &body)?;
    step("Carga excesiva rechazada", &body);

    let (status, trip) = call(
        client,
        reqwest::Method::POST,
        &format!("{}/trips", base_url),
        Some(json!({ "vehicleId": vehicle_id, "cargoWeight": 4500 })),
    )
    .await?;
    expect_status("POST /trips", status, StatusCode::CREATED, &trip)?;
    step("Viaje despachado", &trip);

    let (status, body) = call(
        client,
        reqwest::Method::POST,
        &format!("{}/trips", base_url),
        Some(json!({ "vehicleId": vehicle_id, "cargoWeight": 100 })),
    )
    .await?;
    expect_status("POST /trips (repetido)", status, StatusCode::CONFLICT, &body)?;
    step("Segundo despacho rechazado", &body);

    let (status, record) = call(
        client,
        reqwest::Method::POST,
        &format!("{}/maintenance", base_url),
        Some(json!({ "vehicleId": vehicle_id, "issue": "brake wear" })),
    )
    .await?;
    expect_status("POST /maintenance", status, StatusCode::CREATED, &record)?;
    step("Avería reportada", &record);

    let (status, current) = call(
        client,
        reqwest::Method::GET,
        &format!("{}/vehicles/{}", base_url, vehicle_id),
        None,
    )
    .await?;
    expect_status("GET /vehicles/:id", status, StatusCode::OK, &current)?;
    if current["status"] != "In Shop" {
        bail!("estado final inesperado: {}", current["status"]);
    }

    println!("{}", "✅ Escenario completado: el vehículo está In Shop".bright_green().bold());
    Ok(())
}

async fn call(
    client: &Client,
    method: reqwest::Method,
    url: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let mut request = client.request(method.clone(), url);
    if let Some(body) = body {
        request = request.json(&body);
    }

    let response = request
        .send()
        .await
        .with_context(|| format!("{} {} falló", method, url))?;
    let status = response.status();
    let text = response.text().await?;
    let value = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Ok((status, value))
}

fn expect_status(
    label: &str,
    actual: StatusCode,
    expected: StatusCode,
    body: &Value,
) -> Result<()> {
    if actual != expected {
        bail!("{}: esperado {}, recibido {} → {}", label, expected, actual, body);
    }
    Ok(())
}

fn step(label: &str, body: &Value) {
    println!("{} {}", "▶".bright_blue(), label.bright_white().bold());
    println!("{}", serde_json::to_string_pretty(body).unwrap_or_default().dimmed());
}
