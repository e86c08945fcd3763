use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::debug;

/// Text-frame transport for one client
#[async_trait]
pub trait SocketWrapper: Send {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Next text frame from the client; `None` once the client has gone away
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Receives every inbound text frame together with the sending client's id
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, client_id: &str, message: String);
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        while let Some(frame) = self.next().await {
            match frame {
                Ok(Message::Text(text)) => return Ok(Some(text)),
                Ok(Message::Close(_)) => return Ok(None),
                // Pings are answered by axum; binary frames carry nothing for us
                Ok(_) => {}
                Err(e) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
        Ok(None)
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// One client's live connection.
///
/// Frames from the client go to the message handler. Frames queued for the
/// client by the connection manager arrive on `outbound_receiver` and are
/// written to the socket. Ends when either side goes away.
pub struct Connection {
    pub client_id: String,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    message_handler: Arc<dyn MessageHandler>,
}

impl Connection {
    pub fn new(
        client_id: String,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        message_handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            client_id,
            socket,
            outbound_receiver,
            message_handler,
        }
    }

    /// Pumps frames both ways until the client disconnects or its outbound
    /// channel is dropped; send and receive failures end the connection
    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                outbound = self.outbound_receiver.recv() => match outbound {
                    Some(frame) => self.socket.send_message(frame).await?,
                    None => {
                        debug!(client_id = %self.client_id, "Outbound channel dropped");
                        break;
                    }
                },

                inbound = self.socket.receive_message() => match inbound? {
                    Some(frame) => {
                        self.message_handler
                            .handle_message(&self.client_id, frame)
                            .await;
                    }
                    None => {
                        debug!(client_id = %self.client_id, "Client went away");
                        break;
                    }
                },
            }
        }

        // The peer may already be gone, so a failed close still ends cleanly
        if let Err(e) = self.socket.close().await {
            debug!(client_id = %self.client_id, error = %e, "Close frame not delivered");
        }
        Ok(())
    }
}
