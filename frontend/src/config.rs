use log::Level;

#[cfg(debug_assertions)]
pub fn get_log_level() -> Level {
    Level::Debug // Verbose while running locally with trunk serve
}

#[cfg(not(debug_assertions))]
pub fn get_log_level() -> Level {
    Level::Info
}

/// Prefix for static assets. Empty when trunk serves them from the site root.
pub const ASSET_ROOT: &str = "";

/// Number of hero clips, indexed 1..=TOTAL_VIDEOS.
pub const TOTAL_VIDEOS: usize = 4;

pub fn get_video_src(index: usize) -> String {
    format!("{}/videos/hero-{}.mp4", ASSET_ROOT, index)
}

// Swap animation timings, in milliseconds.
pub const NEXT_VIDEO_EXPAND_MS: f64 = 1000.0;
pub const CURRENT_VIDEO_GROW_MS: f64 = 1500.0;

/// Added to the transition clip's playhead when handing off to the main video.
pub const HANDOFF_EPSILON_SECS: f64 = 0.038;

/// Edge length of the upcoming-video preview square, in pixels (16rem).
pub const PREVIEW_SIZE_PX: f64 = 256.0;

pub const FRAME_CLIP_TARGET: [(f64, f64); 4] = [(14.0, 0.0), (72.0, 0.0), (88.0, 90.0), (0.0, 95.0)];
pub const FRAME_CLIP_FULL: [(f64, f64); 4] = [(0.0, 0.0), (100.0, 0.0), (100.0, 100.0), (0.0, 100.0)];

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SocialIcon {
    Discord,
    Twitter,
    Github,
    Twitch,
}

impl SocialIcon {
    pub fn class_name(&self) -> &'static str {
        match self {
            SocialIcon::Discord => "fa-brands fa-discord",
            SocialIcon::Twitter => "fa-brands fa-twitter",
            SocialIcon::Github => "fa-brands fa-github",
            SocialIcon::Twitch => "fa-brands fa-twitch",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SocialIcon::Discord => "Discord",
            SocialIcon::Twitter => "Twitter",
            SocialIcon::Github => "GitHub",
            SocialIcon::Twitch => "Twitch",
        }
    }
}

pub const FOOTER_LINKS: [(&str, SocialIcon); 4] = [
    ("https://discord.com", SocialIcon::Discord),
    ("https://twitter.com", SocialIcon::Twitter),
    ("https://github.com", SocialIcon::Github),
    ("https://twitch.com", SocialIcon::Twitch),
];

pub const PRIVACY_ANCHOR: &str = "#privacy-policy";
pub const COPYRIGHT: &str = "\u{a9} Nova 2025. All rights reserved";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn video_src_is_one_based_path() {
        assert_eq!(get_video_src(1), "/videos/hero-1.mp4");
        assert_eq!(get_video_src(TOTAL_VIDEOS), "/videos/hero-4.mp4");
    }
}
