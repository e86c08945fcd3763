//! Test assertion helpers - fluent API for verifying test expectations
#![allow(dead_code)] // Test utilities may not all be used in every test

use roomhub::websockets::{MessageType, WebSocketMessage};

use super::setup::TestSetup;

// ============================================================================
// Assertion Helpers
// ============================================================================

pub struct MessageAssertion<'a> {
    setup: &'a TestSetup,
    clients: Vec<&'a str>,
}

impl<'a> MessageAssertion<'a> {
    /// Create an assertion for all clients in the setup
    pub fn for_all_clients(setup: &'a TestSetup) -> Self {
        let clients = setup.clients.iter().map(|s| s.as_str()).collect();
        Self { setup, clients }
    }

    /// Create an assertion for specific clients
    pub fn for_clients(setup: &'a TestSetup, clients: Vec<&'a str>) -> Self {
        Self { setup, clients }
    }

    /// Assert that clients received a specific message type (consumes the message from queue)
    pub async fn received_message_type(self, expected_type: MessageType) -> MessageContent {
        let mut messages = vec![];

        for client in &self.clients {
            let message = self
                .setup
                .mock_conn_manager
                .consume_message_for(client)
                .await;
            assert!(
                message.is_some(),
                "{} should have received a message",
                client
            );

            let msg: WebSocketMessage = serde_json::from_str(&message.unwrap()).unwrap();
            assert_eq!(
                msg.message_type, expected_type,
                "{} received wrong message type",
                client
            );
            messages.push(msg);
        }

        // Every recipient of a broadcast sees the same payload
        for (i, msg) in messages.iter().enumerate().skip(1) {
            assert_eq!(
                &msg.payload, &messages[0].payload,
                "Client {} payload differs from client {}",
                self.clients[i], self.clients[0]
            );
        }

        MessageContent {
            payload: messages[0].payload.clone(),
        }
    }

    /// Assert that clients have no pending messages
    pub async fn received_no_messages(self) {
        for client in &self.clients {
            let messages = self.setup.mock_conn_manager.get_messages_for(client).await;
            assert!(
                messages.is_empty(),
                "{} should not have received any messages, got {:?}",
                client,
                messages
            );
        }
    }
}

/// Payload of a received message, for further checks
pub struct MessageContent {
    pub payload: serde_json::Value,
}

impl MessageContent {
    pub fn field(&self, name: &str) -> &serde_json::Value {
        &self.payload[name]
    }

    pub fn has_field(self, name: &str, expected: &str) -> Self {
        assert_eq!(
            self.payload[name], expected,
            "payload field {} mismatch in {}",
            name, self.payload
        );
        self
    }

    pub fn error_contains(self, fragment: &str) -> Self {
        let message = self.payload["message"].as_str().unwrap_or_default();
        assert!(
            message.contains(fragment),
            "error message {:?} should contain {:?}",
            message,
            fragment
        );
        self
    }

    pub fn rooms(&self) -> Vec<String> {
        let mut rooms: Vec<String> = self.payload["rooms"]
            .as_array()
            .expect("rooms array")
            .iter()
            .filter_map(|v| v.as_str().map(|s| s.to_string()))
            .collect();
        rooms.sort();
        rooms
    }
}
