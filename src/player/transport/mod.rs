use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::Instant;

use crate::player::config::COMMAND_CHAN_SIZE;
use crate::player::graph::{AudioTap, GraphHandle};
use crate::player::media::{MediaElement, MediaEventReceiver};
use crate::player::spectrum::RenderSurface;

pub mod commands;
pub mod events;
mod handlers;
mod player;
pub mod state;

use commands::TransportCommand;
use events::{EventSender, PlayerEvent};
pub use player::Player;
use state::SessionState;

/// Everything a host needs to drive one playback session: the command
/// handle, the outbound event stream, and the tap its audio callback routes
/// sample blocks through.
pub struct SessionHandles {
    pub player: Player,
    pub events: broadcast::Receiver<PlayerEvent>,
    pub tap: AudioTap,
}

/// Spawns the session loop onto the current Tokio runtime.
pub fn spawn_session<M, S>(
    media: M,
    media_events: MediaEventReceiver,
    surface: S,
) -> SessionHandles
where
    M: MediaElement,
    S: RenderSurface,
{
    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHAN_SIZE);
    let event_sender = EventSender::new();
    let event_rx = event_sender.subscribe();

    let graph = GraphHandle::new();
    let tap = graph.tap();
    let session = SessionState::new(media, surface, graph, event_sender);
    tokio::spawn(run_session_loop(session, command_rx, media_events));

    SessionHandles {
        player: Player::new(command_tx),
        events: event_rx,
        tap,
    }
}

/// Runs the session on a dedicated thread with its own current-thread
/// runtime, for hosts that are not async themselves.
pub fn start<M, S>(media: M, media_events: MediaEventReceiver, surface: S) -> SessionHandles
where
    M: MediaElement,
    S: RenderSurface,
{
    let (command_tx, command_rx) = mpsc::channel(COMMAND_CHAN_SIZE);
    let event_sender = EventSender::new();
    let event_rx = event_sender.subscribe();

    let graph = GraphHandle::new();
    let tap = graph.tap();

    std::thread::spawn(move || {
        log::info!("Session thread: Starting.");
        let rt = match tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("Session thread: Failed to build Tokio runtime: {}", e);
                return;
            }
        };
        rt.block_on(async move {
            let session = SessionState::new(media, surface, graph, event_sender);
            run_session_loop(session, command_rx, media_events).await;
        });
        log::info!("Session thread: Stopped.");
    });

    SessionHandles {
        player: Player::new(command_tx),
        events: event_rx,
        tap,
    }
}

/// The transport loop: one cooperative context multiplexing commands, media
/// notifications and the two optional deadlines. Handlers run to completion
/// between suspension points, so state never needs a lock.
async fn run_session_loop<M: MediaElement>(
    mut state: SessionState<M>,
    mut commands: mpsc::Receiver<TransportCommand>,
    mut media_events: MediaEventReceiver,
) {
    log::info!("Transport: Session loop starting.");
    let mut shutdown_ack: Option<oneshot::Sender<()>> = None;

    loop {
        tokio::select! {
            maybe_command = commands.recv() => {
                match maybe_command {
                    Some(TransportCommand::Shutdown(ack)) => {
                        log::info!("Transport: Shutdown received.");
                        shutdown_ack = Some(ack);
                        break;
                    }
                    Some(command) => {
                        log::debug!("Transport: Received {:?}.", command);
                        handlers::dispatch_command(&mut state, command);
                    }
                    None => {
                        log::info!("Transport: Command channel closed. Exiting loop.");
                        break;
                    }
                }
            }
            maybe_event = media_events.recv() => {
                match maybe_event {
                    Some(event) => handlers::dispatch_media_event(&mut state, event),
                    None => {
                        log::info!("Transport: Media event channel closed. Exiting loop.");
                        break;
                    }
                }
            }
            _ = deadline(state.loading_deadline), if state.loading_deadline.is_some() => {
                handlers::track::handle_loading_timeout(&mut state);
            }
            _ = deadline(state.sleep_deadline), if state.sleep_deadline.is_some() => {
                handlers::timer::handle_sleep_timer_fired(&mut state);
            }
        }
    }

    state.sampler.stop();
    if let Some(ack) = shutdown_ack {
        if ack.send(()).is_err() {
            log::error!("Transport: Failed to send shutdown acknowledgement.");
        }
    }
    log::info!("Transport: Session loop finished.");
}

async fn deadline(at: Option<Instant>) {
    match at {
        Some(at) => tokio::time::sleep_until(at).await,
        None => std::future::pending().await,
    }
}
