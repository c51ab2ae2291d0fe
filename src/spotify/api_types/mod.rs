pub mod playlist;
pub mod playlist_tracks;
pub mod playlists;
