use log::{info, warn};
use twilight_gateway::Event;

use crate::error::EventHandlerError;
use crate::pawbot_info;

pub async fn handle_event(shard_id: u64, event: &Event) -> Result<(), EventHandlerError> {
    match &event {
        Event::ShardConnecting(_) => info!("Shard {} is connecting", shard_id),
        Event::ShardConnected(_) => pawbot_info!("Shard {} has connected", shard_id),
        Event::ShardDisconnected(_) => pawbot_info!("Shard {} has disconnected", shard_id),
        Event::ShardReconnecting(_) => {
            pawbot_info!("Shard {} is attempting to reconnect", shard_id)
        }
        Event::ShardResuming(_) => pawbot_info!("Shard {} is resuming", shard_id),
        Event::Ready(_) => pawbot_info!("Connected to the gateway on shard {}!", shard_id),
        Event::GatewayInvalidateSession(recon) => {
            if *recon {
                warn!("The gateway has invalidated our session, but it is reconnectable!");
            } else {
                return Err(EventHandlerError::InvalidSession(shard_id));
            }
        }
        Event::GatewayReconnect => info!("We reconnected to the gateway!"),
        Event::GatewayHello(u) => info!("Registered with gateway {} on shard {}", u, shard_id),
        _ => (),
    }
    Ok(())
}
