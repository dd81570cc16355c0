pub mod config;
pub mod fingerprint;
pub mod pipeline;
pub mod subtitles;
pub mod testing;
pub mod walker;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, DownloadConfig,
    OpenSubtitlesConfig,
};
pub use fingerprint::{fingerprint_file, Fingerprint, FingerprintError};
pub use pipeline::{
    subtitle_target, BatchReport, BatchRunner, FileOutcome, FileResult, PipelineError,
    SelectedSubtitle,
};
pub use subtitles::{
    select, tokenize, OpenSubtitlesClient, SubtitleCandidate, SubtitleError, SubtitleQuery,
    SubtitleService,
};
pub use walker::{collect_videos, is_video_file, VIDEO_EXTENSIONS};
