//! Backend worker: owns the tokio runtime and the HTTP backend, drains the
//! UI command queue and answers with [`UiEvent`]s.

use std::thread;

use client_core::{CategoryResolver, ClientSettings, DecisionSink, FeedProvider, HttpBackend};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: ClientSettings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let backend = match HttpBackend::from_settings(&settings) {
            Ok(backend) => backend,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: {err:#}"),
                )));
                tracing::error!(error = %format!("{err:#}"), "failed to build http backend");
                return;
            }
        };
        tracing::info!(server_url = %backend.base_url(), "backend worker ready");

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::LoadFeed => load_feed(&backend, &ui_tx).await,
                    BackendCommand::SubmitDecision { ticket } => {
                        let result = backend.submit(ticket.decision()).await.map_err(|err| {
                            UiError::from_message(
                                UiErrorContext::SubmitDecision,
                                format!("{err:#}"),
                            )
                        });
                        let _ = ui_tx.send(UiEvent::DecisionSettled { ticket, result });
                    }
                }
            }
            tracing::info!("ui command queue closed; backend worker exiting");
        });
    });
}

async fn load_feed(backend: &HttpBackend, ui_tx: &Sender<UiEvent>) {
    let (feed, categories) = tokio::join!(backend.fetch_feed(), backend.fetch_categories());

    match categories {
        Ok(categories) => {
            let _ = ui_tx.send(UiEvent::CategoriesLoaded(categories));
        }
        Err(err) => {
            tracing::warn!(error = %format!("{err:#}"), "category table unavailable; keeping previous names");
        }
    }

    let event = match feed {
        Ok(events) => UiEvent::FeedLoaded(events),
        Err(err) => UiEvent::FeedFailed(UiError::from_message(
            UiErrorContext::FeedLoad,
            format!("{err:#}"),
        )),
    };
    let _ = ui_tx.send(event);
}
