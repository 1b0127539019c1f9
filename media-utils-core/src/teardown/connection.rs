use crate::models::error::MediaError;
use crate::traits::media_stream::MediaStream;
use crate::traits::media_track::TrackHandle;
use crate::traits::peer_connection::{PeerConnection, SenderHandle};

/// Stop sending a local stream's video over `peer` and stop every local track.
///
/// Either argument being `None` means there is nothing to tear down and the
/// call returns without touching anything.
///
/// The outgoing sender is chosen by the kind of the stream's first video
/// track, not by track identity: the first sender carrying any video track
/// is removed. Tracks are stopped whether or not a sender was found.
pub fn teardown(peer: Option<&dyn PeerConnection>, stream: Option<&dyn MediaStream>) -> Result<(), MediaError> {
    let (Some(peer), Some(stream)) = (peer, stream) else {
        return Ok(());
    };

    match stream.video_tracks().into_iter().next() {
        Some(video_track) => match find_sender_by_kind(peer, &video_track) {
            Some(sender) => {
                peer.remove_track(&sender)?;
                log::debug!("Removed sender {} for stream {}", sender.id(), stream.id());
            }
            None => log::debug!("No {} sender to remove for stream {}", video_track.kind(), stream.id()),
        },
        None => log::warn!("Stream {} has no video track, only stopping tracks", stream.id()),
    }

    let tracks = stream.tracks();
    for track in &tracks {
        track.stop()?;
    }
    log::debug!("Stopped {} tracks of stream {}", tracks.len(), stream.id());

    Ok(())
}

/// First sender with an attached track of the same kind as `target`.
fn find_sender_by_kind(peer: &dyn PeerConnection, target: &TrackHandle) -> Option<SenderHandle> {
    peer.senders().into_iter().find(|sender| {
        sender
            .track()
            .is_some_and(|track| track.kind() == target.kind())
    })
}
