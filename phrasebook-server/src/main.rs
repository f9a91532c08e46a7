use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, get, post, put, web};
use log::{error, info};
use serde::Deserialize;

use phrasebook_core::Phrasebook;

mod message;
mod settings;

use message::{IncomingMessage, route};
use settings::{DEFAULT_SETTINGS_PATH, SETTINGS_ENV, Settings};

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	limit: Option<usize>,
}

struct SharedData {
	phrasebook: Phrasebook,
	max_phrase_length: usize,
	bot_user: Option<String>,
}

/// HTTP POST endpoint `/v1/message`
///
/// Entry point for the chat platform: learns the message if it should be
/// learned, and answers with a generated phrase if the bot was mentioned.
/// Returns `204 No Content` when there is nothing to say.
#[post("/v1/message")]
async fn post_message(data: web::Data<Mutex<SharedData>>, message: web::Json<IncomingMessage>) -> impl Responder {
	info!(
		"{} says: {}",
		message.user.as_deref().unwrap_or("<unknown>"),
		message.text.as_deref().unwrap_or("")
	);

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Phrasebook lock failed"),
	};

	let action = route(&message, shared_data.bot_user.as_deref());
	if action.learn {
		if let Some(text) = message.text.as_deref() {
			shared_data.phrasebook.learn(text);
		}
	}

	if action.reply {
		let phrase = shared_data.phrasebook.generate(shared_data.max_phrase_length);
		info!("Replying: {phrase}");
		HttpResponse::Ok().body(phrase)
	} else {
		HttpResponse::NoContent().finish()
	}
}

/// HTTP PUT endpoint `/v1/learn`
///
/// Learns the plain-text request body as one utterance.
#[put("/v1/learn")]
async fn put_learn(data: web::Data<Mutex<SharedData>>, body: String) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Phrasebook lock failed"),
	};
	shared_data.phrasebook.learn(&body);
	HttpResponse::NoContent().finish()
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a phrase; `limit` defaults to the configured `max_phrase_length`.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Phrasebook lock failed"),
	};
	let limit = query.limit.unwrap_or(shared_data.max_phrase_length);
	HttpResponse::Ok().body(shared_data.phrasebook.generate(limit))
}

/// HTTP PUT endpoint `/v1/dump`
///
/// Persists the table now. The lock is held for the whole write, so two
/// dumps never race on the file.
#[put("/v1/dump")]
async fn put_dump(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Phrasebook lock failed"),
	};
	match shared_data.phrasebook.dump() {
		Ok(()) => HttpResponse::Ok().body("Phrasebook saved"),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to save phrasebook: {e}")),
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Phrasebook lock failed"),
	};
	HttpResponse::Ok().body(format!(
		"order: {}\nkeys: {}",
		shared_data.phrasebook.order(),
		shared_data.phrasebook.table().len()
	))
}

/// Main entry point for the server.
///
/// Reads the settings, loads the persisted phrasebook *before* accepting
/// requests, wraps it in a `Mutex` and starts an Actix-web HTTP server.
/// The phrasebook is dumped once more when the server shuts down.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let settings_path = std::env::var(SETTINGS_ENV).unwrap_or_else(|_| DEFAULT_SETTINGS_PATH.to_owned());
	let settings = Settings::load(&settings_path)?;
	info!("Settings read from {settings_path}: {settings:?}");

	let mut phrasebook = Phrasebook::from_config(&settings.phrasebook).map_err(std::io::Error::other)?;
	phrasebook.load().map_err(std::io::Error::other)?;

	let shared_data = SharedData {
		phrasebook,
		max_phrase_length: settings.phrasebook.max_phrase_length,
		bot_user: settings.server.bot_user.clone(),
	};
	let shared_phrasebook = web::Data::new(Mutex::new(shared_data));
	let app_data = shared_phrasebook.clone();

	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(app_data.clone())
			.service(post_message)
			.service(put_learn)
			.service(get_generated)
			.service(put_dump)
			.service(get_stats)
	})
		.bind((settings.server.host.as_str(), settings.server.port))?
		.run()
		.await?;

	let shared_data = shared_phrasebook.lock().map_err(|_| std::io::Error::other("Phrasebook lock failed"))?;
	shared_data.phrasebook.dump().map_err(|e| {
		error!("Final dump failed: {e}");
		std::io::Error::other(e)
	})
}
