mod support;

use reqwest::StatusCode;
use serde_json::{Value, json};

fn is_armed(world: &Value, rider: u64) -> bool {
    world["armed_riders"]
        .as_array()
        .is_some_and(|riders| riders.iter().any(|r| r.as_u64() == Some(rider)))
}

fn body(world: &Value, id: u64) -> Option<&Value> {
    world["bodies"]
        .as_array()?
        .iter()
        .find(|b| b["id"].as_u64() == Some(id))
}

async fn post(client: &reqwest::Client, url: String, payload: Value) {
    let res = client
        .post(url)
        .json(&payload)
        .send()
        .await
        .expect("request should succeed");
    assert_eq!(res.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn second_use_detonates_and_pushes_nearby_props() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    let rider = 101;

    // The explosive flies along +Z from the rider, so line its path with props
    // close enough that any detonation point has one within the blast radius.
    for step in 1..=20 {
        let z = f64::from(step) * 4.0;
        post(
            &client,
            format!("{base_url}/objects"),
            json!({ "x": 0.0, "y": 64.0, "z": z }),
        )
        .await;
    }
    post(
        &client,
        format!("{base_url}/riders"),
        json!({ "rider_id": rider, "x": 0.0, "y": 64.0, "z": 0.0, "fuel": 3 }),
    )
    .await;
    let use_detonator = json!({ "rider_id": rider, "action": "use_air", "item": "detonator" });

    post(&client, format!("{base_url}/interact"), use_detonator.clone()).await;
    support::poll_world(&client, base_url, |w| is_armed(w, rider)).await;

    post(&client, format!("{base_url}/interact"), use_detonator).await;
    let world = support::poll_world(&client, base_url, |w| !is_armed(w, rider)).await;

    assert!(
        !world["recent_effects"].as_array().unwrap().is_empty(),
        "detonation should leave an effect: {world}"
    );
    assert!(body(&world, rider).is_some(), "rider still in world");
    let pushed = world["bodies"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|b| b["kind"] == "prop")
        .any(|b| {
            let speed = ["vx", "vy", "vz"]
                .iter()
                .map(|k| b[*k].as_f64().unwrap().powi(2))
                .sum::<f64>();
            speed > 0.0
        });
    assert!(pushed, "no prop near the blast moved: {world}");
}

#[tokio::test]
async fn rider_without_fuel_never_arms() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    let rider = 202;

    post(
        &client,
        format!("{base_url}/riders"),
        json!({ "rider_id": rider, "x": 500.0, "y": 64.0, "z": 500.0 }),
    )
    .await;
    support::poll_world(&client, base_url, |w| body(w, rider).is_some()).await;

    post(
        &client,
        format!("{base_url}/interact"),
        json!({ "rider_id": rider, "action": "use_block", "item": "detonator" }),
    )
    .await;

    let start = support::poll_world(&client, base_url, |_| true).await;
    let tick = start["tick"].as_u64().unwrap();
    let later = support::poll_world(&client, base_url, |w| {
        w["tick"].as_u64().unwrap() >= tick + 5
    })
    .await;
    assert!(!is_armed(&later, rider));

    let notices = later["notices"].as_array().unwrap();
    assert!(
        notices
            .iter()
            .any(|n| n["rider_id"].as_u64() == Some(rider) && n["notice"] == "missing_fuel"),
        "rider should be told fuel is missing: {later}"
    );
}

#[tokio::test]
async fn leave_removes_the_rider() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();
    let rider = 303;

    post(
        &client,
        format!("{base_url}/riders"),
        json!({ "rider_id": rider, "x": -500.0, "y": 64.0, "z": 0.0, "fuel": 1 }),
    )
    .await;
    support::poll_world(&client, base_url, |w| body(w, rider).is_some()).await;

    post(
        &client,
        format!("{base_url}/riders/leave"),
        json!({ "rider_id": rider }),
    )
    .await;
    support::poll_world(&client, base_url, |w| body(w, rider).is_none()).await;
}

#[tokio::test]
async fn malformed_interact_is_rejected() {
    let base_url = support::ensure_server();
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{base_url}/interact"))
        .json(&json!({ "rider_id": 1, "action": "jump", "item": "detonator" }))
        .send()
        .await
        .expect("request should succeed");

    assert!(res.status().is_client_error());
}
