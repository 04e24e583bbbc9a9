use playhall::prelude::*;
use serde_json::{Value, json};

// ---------------------------------------------------------------------------
// Wire helper
// ---------------------------------------------------------------------------

/// Sends one JSON request through the facade and prints both sides.
async fn send(hall: &MemoryPlayhall, request: Value) -> Result<Value, Box<dyn std::error::Error>> {
    let bytes = serde_json::to_vec(&request)?;
    let reply: Value = serde_json::from_slice(&hall.handle_bytes(&bytes).await?)?;
    println!("-> {request}\n<- {reply}\n");
    Ok(reply)
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    playhall::telemetry::init()?;

    let hall = Playhall::builder().build();
    tracing::info!("playhall ready");

    for (nick, email) in [("alice", "alice@mail.com"), ("bob", "bob@mail.com")] {
        send(
            &hall,
            json!({"type": "register", "nickName": nick, "email": email, "passwordHash": "secret"}),
        )
        .await?;
    }

    let mut tokens = Vec::new();
    for nick in ["alice", "bob"] {
        let reply = send(
            &hall,
            json!({"type": "login", "nickName": nick, "passwordHash": "secret"}),
        )
        .await?;
        tokens.push(reply["token"].as_str().unwrap_or_default().to_owned());
    }
    let (alice, bob) = (&tokens[0], &tokens[1]);

    send(&hall, json!({"type": "createGame", "gameName": "arena", "playerToken": alice})).await?;
    send(&hall, json!({"type": "createGame", "gameName": "arena", "playerToken": bob})).await?;
    send(&hall, json!({"type": "joinGame", "gameName": "arena", "playerToken": bob})).await?;
    send(&hall, json!({"type": "leaveGame", "gameName": "arena", "playerToken": bob})).await?;
    send(&hall, json!({"type": "leaveGame", "gameName": "arena", "playerToken": alice})).await?;

    send(
        &hall,
        json!({"type": "gameDetails", "includes": ["gameName", "duration", "teamsDetails"]}),
    )
    .await?;
    send(
        &hall,
        json!({"type": "playerDetails", "includes": ["nickName", "totalPlayTime"]}),
    )
    .await?;

    Ok(())
}
