pub mod audio_graph;
pub mod media_stream;
pub mod media_track;
pub mod peer_connection;
