use bureau_of_magical_things::rocket_with_state;
use bureau_of_magical_things::session::GameState;
use rocket::http::{ContentType, Status};
use rocket::local::blocking::Client;
use rocket::serde::json::serde_json;

fn client() -> Client {
    Client::tracked(rocket_with_state(GameState::with_seed(7))).expect("valid rocket instance")
}

fn json(response: rocket::local::blocking::LocalResponse<'_>) -> serde_json::Value {
    serde_json::from_str(&response.into_string().expect("body")).expect("json")
}

fn start<'c>(client: &'c Client, body: &str) -> rocket::local::blocking::LocalResponse<'c> {
    client
        .post("/interception")
        .header(ContentType::JSON)
        .body(body)
        .dispatch()
}

fn cast<'c>(client: &'c Client, spell: &str) -> rocket::local::blocking::LocalResponse<'c> {
    client
        .post("/interception/action")
        .header(ContentType::JSON)
        .body(format!(r#"{{ "spell": "{}" }}"#, spell))
        .dispatch()
}

#[test]
fn no_interception_before_start() {
    let client = client();
    let resp = client.get("/interception").dispatch();
    assert_eq!(resp.status(), Status::Ok);
    assert!(json(resp).is_null());

    let resp = cast(&client, "attack");
    assert_eq!(resp.status(), Status::NotFound);
}

#[test]
fn start_named_enemy_and_win() {
    let client = client();
    let resp = start(&client, r#"{ "enemy": "Void Stalker" }"#);
    assert_eq!(resp.status(), Status::Created);
    let state = json(resp);
    assert_eq!(state["enemy"]["name"], "Void Stalker");
    assert_eq!(state["player_health"], 100);
    assert_eq!(state["turn"], 1);

    let first = json(cast(&client, "attack"));
    assert_eq!(first["resolution"]["state"]["enemy"]["health"], 20);
    assert!(first["resolution"]["result"].is_null());

    let second = json(cast(&client, "attack"));
    assert_eq!(second["resolution"]["result"]["outcome"], "clean");
    assert_eq!(second["resolution"]["result"]["energy_used"], 40);

    let resp = client.get("/interception").dispatch();
    assert!(json(resp).is_null());

    let result = json(client.get("/interception/result").dispatch());
    assert_eq!(result["control_gained"], 10);

    let stats = json(client.get("/player/stats").dispatch());
    assert_eq!(stats["stats"]["control"], 60);
    assert_eq!(stats["stats"]["alignment"], 3);
    assert_eq!(stats["stats"]["energy"], 60);
    assert_eq!(stats["alignment_label"], "Neutral");
    assert_eq!(stats["missions_completed"], 1);
}

#[test]
fn second_start_is_a_bad_request() {
    let client = client();
    assert_eq!(start(&client, "{}").status(), Status::Created);
    let resp = start(&client, "{}");
    assert_eq!(resp.status(), Status::BadRequest);
    let status = json(resp);
    assert_eq!(status["message"], "An interception is already in progress");
}

#[test]
fn unknown_enemy_is_not_found() {
    let client = client();
    let resp = start(&client, r#"{ "enemy": "Gnome" }"#);
    assert_eq!(resp.status(), Status::NotFound);
}

#[test]
fn unknown_spell_is_rejected_by_the_parser() {
    let client = client();
    start(&client, "{}");
    let resp = cast(&client, "fireball");
    assert!(resp.status() == Status::UnprocessableEntity || resp.status() == Status::BadRequest);
}

#[test]
fn combat_log_shows_recent_lines() {
    let client = client();
    start(&client, r#"{ "enemy": "Shadow Wraith" }"#);
    let resp = json(cast(&client, "bind"));
    assert_eq!(
        resp["log"][0],
        "Bind spell! Enemy immobilized and took 20 damage."
    );
    let log = json(client.get("/interception/log").dispatch());
    assert_eq!(log.as_array().map(Vec::len), Some(2));
    assert_eq!(log[1], "Enemy is bound and cannot act!");
}

#[test]
fn incidents_and_rest() {
    let client = client();
    let incidents = json(client.get("/incidents").dispatch());
    assert_eq!(incidents.as_array().map(Vec::len), Some(6));

    let resp = client.post("/incidents/draw").dispatch();
    assert_eq!(resp.status(), Status::Ok);
    let drawn = json(resp);
    assert!(drawn["id"].as_str().is_some_and(|id| id.starts_with("INC-")));

    let stats = json(client.post("/player/rest").dispatch());
    assert_eq!(stats["energy"], 100);
}

#[test]
fn action_log_records_session_inputs() {
    let client = client();
    let resp = client
        .post("/player/seed")
        .header(ContentType::JSON)
        .body(r#"{ "seed": 99 }"#)
        .dispatch();
    assert_eq!(resp.status(), Status::Ok);
    start(&client, "{}");
    cast(&client, "shield");

    let log = json(client.get("/actions/log").dispatch());
    let types: Vec<&str> = log["entries"]
        .as_array()
        .expect("entries")
        .iter()
        .filter_map(|e| e["action_type"].as_str())
        .collect();
    assert_eq!(
        types,
        vec!["SetSeed", "SetSeed", "StartInterception", "CastSpell"]
    );

    let page = json(client.get("/actions/log?from_seq=2&limit=1").dispatch());
    assert_eq!(page["entries"][0]["seq"], 2);
    assert_eq!(page["next_seq"], 3);

    let casts = json(client.get("/actions/log?action_type=CastSpell").dispatch());
    assert_eq!(casts["entries"].as_array().map(Vec::len), Some(1));
}

#[test]
fn openapi_document_is_served() {
    let client = client();
    let resp = client.get("/openapi.json").dispatch();
    assert_eq!(resp.status(), Status::Ok);
    let doc = json(resp);
    assert!(doc["paths"]["/interception/action"].is_object());
}

fn select<'c>(client: &'c Client, id: &str) -> rocket::local::blocking::LocalResponse<'c> {
    client
        .post("/characters/select")
        .header(ContentType::JSON)
        .body(format!(r#"{{ "id": "{}" }}"#, id))
        .dispatch()
}

#[test]
fn leaderboard_ranks_characters_by_score() {
    let client = client();
    assert_eq!(
        json(client.get("/characters").dispatch()).as_array().map(Vec::len),
        Some(6)
    );

    assert_eq!(select(&client, "lily").status(), Status::Ok);
    let joined = json(select(&client, "ruksy"));
    assert_eq!(joined["total_score"], 0);
    start(&client, r#"{ "enemy": "Void Stalker" }"#);
    cast(&client, "attack");
    cast(&client, "attack");

    let stats = json(client.get("/player/stats").dispatch());
    assert_eq!(stats["current_character"], "ruksy");

    let board = json(client.get("/leaderboard").dispatch());
    assert_eq!(board[0]["id"], "ruksy");
    assert_eq!(board[0]["total_score"], 100);
    assert_eq!(board[0]["missions_completed"], 1);
    assert_eq!(board[1]["id"], "lily");
    assert_eq!(board[1]["total_score"], 0);
}

#[test]
fn selecting_characters_is_validated() {
    let client = client();
    assert_eq!(select(&client, "gandalf").status(), Status::NotFound);
    select(&client, "kyra");
    start(&client, "{}");
    assert_eq!(select(&client, "peter").status(), Status::BadRequest);
}

#[test]
fn incidents_carry_difficulty_scaled_by_control() {
    let client = client();
    let incidents = json(client.get("/incidents").dispatch());
    // Starting control 50 scales difficulty by 1.25.
    assert_eq!(incidents[0]["id"], "INC-001");
    assert_eq!(incidents[0]["difficulty"], 2);
    assert_eq!(incidents[0]["scaled_difficulty"], 2.5);
}

#[test]
fn shutdown_flushes_the_action_log_file() {
    use bureau_of_magical_things::config::GameConfig;
    use bureau_of_magical_things::session::action_log::ActionLog;

    let path = std::env::temp_dir().join(format!("bmt_api_flush_{}.jsonl", std::process::id()));
    let _ = std::fs::remove_file(&path);
    let gs = GameState::from_config(&GameConfig {
        seed: Some(5),
        action_log_file: Some(path.clone()),
    });
    let client = Client::tracked(rocket_with_state(gs)).expect("valid rocket instance");
    start(&client, "{}");
    client.terminate();

    let types: Vec<String> = ActionLog::read_entries(&path)
        .expect("log written")
        .into_iter()
        .map(|e| e.action_type)
        .collect();
    assert_eq!(types, vec!["SetSeed", "StartInterception"]);
    let _ = std::fs::remove_file(&path);
}
