use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::category::short_category;
use super::templates::{Template, TemplateVars};
use crate::domain::ChannelWatch;
use crate::notification::Announcement;

const ELLIPSIS: char = '…';

/// Composer settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    /// Maximum announcement length, in characters.
    pub max_chars: usize,
    /// Titles containing this substring are never announced.
    pub test_marker: String,
}

impl ComposerConfig {
    pub const DEFAULT_MAX_CHARS: usize = 140;
    pub const DEFAULT_TEST_MARKER: &'static str = "[test]";
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            max_chars: Self::DEFAULT_MAX_CHARS,
            test_marker: Self::DEFAULT_TEST_MARKER.to_string(),
        }
    }
}

/// Result of composing an announcement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Composed {
    Message(Announcement),
    /// The live title carries the test marker; nothing should be published.
    SuppressedByTestMarker,
}

#[cfg(test)]
impl Composed {
    pub fn message(&self) -> Option<&Announcement> {
        match self {
            Composed::Message(announcement) => Some(announcement),
            Composed::SuppressedByTestMarker => None,
        }
    }
}

/// Builds announcement text for channels that just went live.
///
/// Holds one generator for the lifetime of the composer.
pub struct MessageComposer {
    config: ComposerConfig,
    rng: StdRng,
}

impl MessageComposer {
    pub fn new(config: ComposerConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Composer with a fixed seed, for reproducible selection.
    pub fn with_seed(config: ComposerConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn is_test_title(&self, title: &str) -> bool {
        title.contains(&self.config.test_marker)
    }

    fn fits(&self, text: &str) -> bool {
        text.chars().count() <= self.config.max_chars
    }

    /// Compose the announcement for `entry`, live in `category` with `title`.
    pub fn compose(
        &mut self,
        entry: &ChannelWatch,
        category: &str,
        title: &str,
        watch_url: &str,
    ) -> Composed {
        if self.is_test_title(title) {
            return Composed::SuppressedByTestMarker;
        }

        let handle = entry.resolved_handle();
        let vars = TemplateVars {
            handle,
            url: watch_url,
            category: short_category(category),
        };

        let template = Template::ALL[self.rng.random_range(0..Template::ALL.len())];
        let candidate = template.render(&vars);

        let (text, used_fallback) = if self.fits(&candidate) {
            (candidate, false)
        } else {
            debug!(
                template = ?template,
                chars = candidate.chars().count(),
                max = self.config.max_chars,
                "Candidate too long, using fallback"
            );
            (self.fallback(handle, watch_url), true)
        };

        Composed::Message(Announcement::new(entry, watch_url, text, used_fallback))
    }

    /// Fallback text, shortened until it fits.
    ///
    /// The handle is cut first. If the limit cannot hold even the fixed part
    /// of the template, the text itself is cut.
    fn fallback(&self, handle: &str, url: &str) -> String {
        let full = Template::fallback(handle, url);
        if self.fits(&full) {
            return full;
        }

        let fixed = Template::fallback("", url).chars().count();
        let max = self.config.max_chars;
        if max > fixed + 1 {
            let keep = max - fixed - 1;
            let short: String = handle.chars().take(keep).chain([ELLIPSIS]).collect();
            return Template::fallback(&short, url);
        }

        full.chars().take(max).collect()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const URL: &str = "https://twitch.tv/alicestream";

    fn alice() -> ChannelWatch {
        ChannelWatch::new("Alice", "alicestream", Some(String::new()))
    }

    #[test]
    fn test_compose_example() {
        let mut composer = MessageComposer::with_seed(ComposerConfig::default(), 7);
        let composed = composer.compose(
            &alice(),
            "Counter-Strike: Global Offensive",
            "ranked grinding",
            URL,
        );

        let announcement = composed.message().expect("message");
        assert!(announcement.text.chars().count() <= 140);
        assert!(announcement.text.contains("twitch.tv/alicestream"));
        assert!(announcement.text.contains("Alice"));
        assert!(!announcement.text.contains("Counter-Strike"));
        assert_eq!(announcement.channel_id, "alicestream");
    }

    /// Every text the templates can produce for `handle` live in CS:GO.
    fn possible_texts(handle: &str) -> Vec<String> {
        let vars = TemplateVars {
            handle,
            url: URL,
            category: "#CSGO",
        };
        Template::ALL.iter().map(|t| t.render(&vars)).collect()
    }

    #[test]
    fn test_category_templates_carry_tag() {
        let expected = possible_texts("Alice");
        let mut composer = MessageComposer::with_seed(ComposerConfig::default(), 3);

        let mut tagged = 0;
        for _ in 0..100 {
            let composed = composer.compose(
                &alice(),
                "Counter-Strike: Global Offensive",
                "ranked grinding",
                URL,
            );
            let text = &composed.message().unwrap().text;
            assert!(expected.contains(text), "{text}");
            if text.contains("#CSGO") {
                tagged += 1;
            }
        }
        assert!(tagged > 0);
    }

    #[test]
    fn test_dash_handle_uses_display_name() {
        let entry = ChannelWatch::new("Alice", "alicestream", Some("-".to_string()));
        let expected = possible_texts("Alice");
        let mut composer = MessageComposer::with_seed(ComposerConfig::default(), 5);

        for _ in 0..20 {
            let composed = composer.compose(&entry, "Counter-Strike: Global Offensive", "t", URL);
            let text = &composed.message().unwrap().text;
            assert!(expected.contains(text), "{text}");
        }
    }

    #[test]
    fn test_category_is_shortened_when_used() {
        let mut composer = MessageComposer::with_seed(ComposerConfig::default(), 1);
        for _ in 0..100 {
            let composed = composer.compose(
                &alice(),
                "Counter-Strike: Global Offensive",
                "ranked grinding",
                URL,
            );
            let text = &composed.message().unwrap().text;
            assert!(!text.contains("Counter-Strike"), "{text}");
        }
    }

    #[test]
    fn test_test_marker_suppresses() {
        let mut composer = MessageComposer::with_seed(ComposerConfig::default(), 1);
        let composed = composer.compose(&alice(), "Overwatch", "ranked grinding [test]", URL);
        assert_eq!(composed, Composed::SuppressedByTestMarker);
    }

    #[test]
    fn test_custom_test_marker() {
        let config = ComposerConfig {
            test_marker: "#noannounce".to_string(),
            ..Default::default()
        };
        let mut composer = MessageComposer::with_seed(config, 1);
        assert!(composer.is_test_title("practice #noannounce"));
        assert!(!composer.is_test_title("practice [test]"));
        assert!(
            composer
                .compose(&alice(), "", "practice [test]", URL)
                .message()
                .is_some()
        );
    }

    #[test]
    fn test_every_pick_fits_limit() {
        let entry = ChannelWatch::new(
            "A Rather Long Display Name",
            "averyveryverylongchannel",
            Some("@an_exceedingly_long_handle".to_string()),
        );
        let url = "https://twitch.tv/averyveryverylongchannel";
        let mut composer = MessageComposer::with_seed(ComposerConfig::default(), 42);

        let mut fallbacks = 0;
        for _ in 0..200 {
            let composed = composer.compose(
                &entry,
                "Some Category With A Really Remarkably Long Official Name",
                "title",
                url,
            );
            let announcement = composed.message().unwrap();
            assert!(announcement.text.chars().count() <= 140, "{}", announcement.text);
            if announcement.used_fallback {
                fallbacks += 1;
                assert_eq!(
                    announcement.text,
                    Template::fallback("@an_exceedingly_long_handle", url)
                );
            }
        }
        assert!(fallbacks > 0);
    }

    #[test]
    fn test_fallback_shortens_handle() {
        let config = ComposerConfig {
            max_chars: 80,
            ..Default::default()
        };
        let composer = MessageComposer::with_seed(config, 0);
        let handle = "x".repeat(100);
        let text = composer.fallback(&handle, URL);
        assert_eq!(text.chars().count(), 80);
        assert!(text.contains('…'));
        assert!(text.ends_with(&format!("{URL} !")));
    }

    #[test]
    fn test_fallback_cut_when_limit_tiny() {
        let config = ComposerConfig {
            max_chars: 10,
            ..Default::default()
        };
        let composer = MessageComposer::with_seed(config, 0);
        assert_eq!(composer.fallback("Alice", URL).chars().count(), 10);
    }

    #[test]
    fn test_same_seed_same_choice() {
        let mut a = MessageComposer::with_seed(ComposerConfig::default(), 99);
        let mut b = MessageComposer::with_seed(ComposerConfig::default(), 99);
        for _ in 0..10 {
            let left = a.compose(&alice(), "Overwatch", "t", URL);
            let right = b.compose(&alice(), "Overwatch", "t", URL);
            assert_eq!(
                left.message().map(|m| &m.text),
                right.message().map(|m| &m.text)
            );
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        /// Whatever the handle, category and limit, the text fits.
        #[test]
        fn prop_compose_never_exceeds_limit(
            name in "\\PC{1,40}",
            handle in "\\PC{0,120}",
            category in "\\PC{0,120}",
            max_chars in 1usize..300,
            seed in any::<u64>(),
        ) {
            let config = ComposerConfig {
                max_chars,
                ..Default::default()
            };
            let mut composer = MessageComposer::with_seed(config, seed);
            let entry = ChannelWatch::new(name, "alicestream", Some(handle));

            let composed = composer.compose(&entry, &category, "stream", URL);
            let text = &composed.message().unwrap().text;
            prop_assert!(text.chars().count() <= max_chars, "{} > {}", text.chars().count(), max_chars);
        }
    }
}
