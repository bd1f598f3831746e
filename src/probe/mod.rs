//! Signal probes. Each probe performs its own outbound calls and degrades to
//! an absent signal on any failure instead of returning an error.

pub mod feed;
pub mod media;
pub mod repo;

pub use media::MediaMentionProbe;
pub use repo::RepoActivityProbe;
