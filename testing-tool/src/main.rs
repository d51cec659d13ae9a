use anyhow::Result;
use colored::*;
use serde_json::{json, Value};
use std::io::{self, Write};

#[tokio::main]
async fn main() -> Result<()> {
    println!("{}", "🚑 Emergency Dispatch Testing Tool".bright_blue().bold());
    println!("{}", "=====================================".bright_blue());
    println!();

    let base_url = std::env::var("DISPATCH_API_URL")
        .unwrap_or_else(|_| "http://localhost:3000".to_string());
    println!("{} {}", "🌐 API:".bright_blue(), base_url);

    let client = reqwest::Client::new();

    loop {
        println!();
        println!("{}", "📋 MENÚ PRINCIPAL".bright_green().bold());
        println!("{}", "==================".bright_green());
        println!("1. 🚑 Registrar ambulancia");
        println!("2. 📋 Listar ambulancias");
        println!("3. 🚨 Enviar emergencia");
        println!("4. 🚪 Salir");
        let choice = prompt("Selecciona una opción (1-4): ")?;

        let result = match choice.as_str() {
            "1" => register_ambulance(&client, &base_url).await,
            "2" => list_ambulances(&client, &base_url).await,
            "3" => send_emergency(&client, &base_url).await,
            "4" => {
                println!("{}", "👋 ¡Hasta luego!".bright_green());
                break;
            }
            _ => {
                println!("{}", "❌ Opción inválida. Intenta de nuevo.".bright_red());
                continue;
            }
        };

        if let Err(e) = result {
            println!("{} {}", "❌ Error:".bright_red(), e);
        }
    }

    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}", label.bright_yellow());
    io::stdout().flush()?;
    let mut value = String::new();
    io::stdin().read_line(&mut value)?;
    Ok(value.trim().to_string())
}

fn optional(value: String) -> Value {
    if value.is_empty() {
        Value::Null
    } else {
        Value::String(value)
    }
}

async fn register_ambulance(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<()> {
    println!();
    println!("{}", "🚑 REGISTRAR AMBULANCIA".bright_cyan().bold());
    println!("{}", "========================".bright_cyan());

    let payload = json!({
        "name": prompt("Nombre del servicio: ")?,
        "contactNumber": prompt("Teléfono del servicio: ")?,
        "vehicleNumber": prompt("Matrícula: ")?,
        "vehicleType": optional(prompt("Tipo (basic/advanced/patient-transport/neonatal/air): ")?),
        "latitude": prompt("Latitud: ")?,
        "longitude": prompt("Longitud: ")?,
        "driverName": prompt("Nombre del conductor: ")?,
        "driverContact": prompt("Teléfono del conductor: ")?,
        "address": optional(prompt("Dirección (opcional): ")?),
        "city": optional(prompt("Ciudad (opcional): ")?),
    });

    let url = format!("{}/api/emergency/ambulances", base_url);
    print_response(client.post(&url).json(&payload).send().await?).await
}

async fn list_ambulances(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<()> {
    let url = format!("{}/api/emergency/ambulances", base_url);
    print_response(client.get(&url).send().await?).await
}

async fn send_emergency(
    client: &reqwest::Client,
    base_url: &str,
) -> Result<()> {
    println!();
    println!("{}", "🚨 ENVIAR EMERGENCIA".bright_cyan().bold());
    println!("{}", "=====================".bright_cyan());

    let payload = json!({
        "latitude": prompt("Latitud del paciente: ")?,
        "longitude": prompt("Longitud del paciente: ")?,
        "callerPhone": optional(prompt("Teléfono del paciente (opcional): ")?),
    });

    let url = format!("{}/api/emergency/dispatch", base_url);
    let response = client.post(&url).json(&payload).send().await?;
    let status = response.status();
    let body: Value = response.json().await?;

    if !status.is_success() {
        println!("{} {}", "❌ Status:".bright_red(), status);
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    if body["degraded"].as_bool().unwrap_or(false) {
        println!("{}", "⚠️ Ninguna ambulancia en el radio; mostrando todas".bright_yellow());
    }
    println!("{}", body["message"].as_str().unwrap_or_default().bright_green());

    for candidate in body["candidates"].as_array().into_iter().flatten() {
        println!(
            "  {} {:>8} km  {}  {}  ({})",
            "🚑".bright_blue(),
            candidate["distanceKm"],
            candidate["vehicleNumber"].as_str().unwrap_or_default(),
            candidate["contactHandle"].as_str().unwrap_or_default(),
            candidate["status"].as_str().unwrap_or_default(),
        );
    }
    Ok(())
}

async fn print_response(response: reqwest::Response) -> Result<()> {
    let status = response.status();
    let body: Value = response.json().await?;

    if status.is_success() {
        println!("{} {}", "✅ Status:".bright_green(), status);
    } else {
        println!("{} {}", "❌ Status:".bright_red(), status);
    }
    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
