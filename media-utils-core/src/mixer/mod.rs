pub mod stream_mixer;
