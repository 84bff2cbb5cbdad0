//! An in-memory CRUD API for people, served by the router.
//!
//! ```text
//! PORT=9000 cargo run --example people_api
//! curl -X POST localhost:9000/people -d '{"name":"Ada","age":36,"student":false}'
//! curl localhost:9000/people/1
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use microrouter::{
    middleware, HttpRequest, HttpResponse, HttpServer, Router, ServerConfig, ServerError, StatusCode,
};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Person {
    #[serde(default)]
    id: u64,
    name: String,
    age: u32,
    #[serde(default)]
    student: bool,
}

#[derive(Default)]
struct People {
    next_id: u64,
    by_id: BTreeMap<u64, Person>,
}

type Store = Arc<Mutex<People>>;

fn bad_request(message: impl Into<String>) -> HttpResponse {
    HttpResponse::text(StatusCode::BadRequest, message)
}

fn person_not_found() -> HttpResponse {
    HttpResponse::text(StatusCode::NotFound, "Person not found")
}

/// The `{id}` path parameter as a number.
fn person_id(req: &HttpRequest) -> Result<u64, HttpResponse> {
    req.param("id")
        .and_then(|id| id.parse().ok())
        .ok_or_else(|| bad_request("Invalid person ID"))
}

fn person_body(req: &HttpRequest) -> Result<Person, HttpResponse> {
    serde_json::from_slice(&req.body).map_err(|e| bad_request(e.to_string()))
}

async fn list_people(store: Store) -> Result<HttpResponse, ServerError> {
    let people = store.lock().await;
    let list: Vec<&Person> = people.by_id.values().collect();
    HttpResponse::json(StatusCode::Ok, &list)
}

async fn create_person(store: Store, req: HttpRequest) -> Result<HttpResponse, ServerError> {
    let mut person = match person_body(&req) {
        Ok(person) => person,
        Err(response) => return Ok(response),
    };

    let mut people = store.lock().await;
    people.next_id += 1;
    person.id = people.next_id;
    people.by_id.insert(person.id, person.clone());
    HttpResponse::json(StatusCode::Created, &person)
}

async fn get_person(store: Store, req: HttpRequest) -> Result<HttpResponse, ServerError> {
    let id = match person_id(&req) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    match store.lock().await.by_id.get(&id) {
        Some(person) => HttpResponse::json(StatusCode::Ok, person),
        None => Ok(person_not_found()),
    }
}

async fn update_person(store: Store, req: HttpRequest) -> Result<HttpResponse, ServerError> {
    let (id, mut person) = match person_id(&req).and_then(|id| Ok((id, person_body(&req)?))) {
        Ok(parsed) => parsed,
        Err(response) => return Ok(response),
    };

    let mut people = store.lock().await;
    let Some(slot) = people.by_id.get_mut(&id) else {
        return Ok(person_not_found());
    };
    person.id = id;
    *slot = person.clone();
    HttpResponse::json(StatusCode::Ok, &person)
}

async fn delete_person(store: Store, req: HttpRequest) -> Result<HttpResponse, ServerError> {
    let id = match person_id(&req) {
        Ok(id) => id,
        Err(response) => return Ok(response),
    };

    match store.lock().await.by_id.remove(&id) {
        Some(_) => Ok(HttpResponse::new(StatusCode::NoContent)),
        None => Ok(person_not_found()),
    }
}

fn routes(store: Store) -> Router {
    let mut router = Router::new();
    router.middleware(middleware::logger());

    let s = store.clone();
    router.get("/people", move |_req| list_people(s.clone()));
    let s = store.clone();
    router.post("/people", move |req| create_person(s.clone(), req));
    let s = store.clone();
    router.get("/people/{id}", move |req| get_person(s.clone(), req));
    let s = store.clone();
    router.put("/people/{id}", move |req| update_person(s.clone(), req));
    let s = store;
    router.delete("/people/{id}", move |req| delete_person(s.clone(), req));

    router.not_found(|_req| async {
        Ok(HttpResponse::text(StatusCode::NotFound, "Custom 404: Page not found"))
    });
    router
}

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let store = Store::default();
    let server = HttpServer::new(ServerConfig::from_env(), routes(store).into_handler());
    server.start().await
}
