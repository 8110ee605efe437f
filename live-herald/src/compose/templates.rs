/// Values interpolated into a template.
#[derive(Debug, Clone, Copy)]
pub struct TemplateVars<'a> {
    pub handle: &'a str,
    pub url: &'a str,
    pub category: &'a str,
}

/// Announcement phrasings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    LookingForStreams,
    ComeAndWatch,
    SearchingForStreams,
    WatchWithUs,
    OurFriend,
    CheckOutLiveWith,
    CategoryAndChill,
    WantANewStreamer,
    WatchPlay,
}

impl Template {
    /// Every variant eligible for random selection.
    pub const ALL: [Template; 9] = [
        Template::LookingForStreams,
        Template::ComeAndWatch,
        Template::SearchingForStreams,
        Template::WatchWithUs,
        Template::OurFriend,
        Template::CheckOutLiveWith,
        Template::CategoryAndChill,
        Template::WantANewStreamer,
        Template::WatchPlay,
    ];

    #[cfg(test)]
    fn uses_category(&self) -> bool {
        matches!(
            self,
            Template::CheckOutLiveWith | Template::CategoryAndChill | Template::WatchPlay
        )
    }

    pub fn render(&self, vars: &TemplateVars<'_>) -> String {
        let TemplateVars {
            handle,
            url,
            category,
        } = *vars;

        match self {
            Template::LookingForStreams => {
                format!("Looking for streams? {handle} is now live at {url} - come and watch!")
            }
            Template::ComeAndWatch => format!("Come and watch {handle} with us over on {url} ! "),
            Template::SearchingForStreams => {
                format!("Searching for new streams? {handle} is now live at {url} - come say hi!")
            }
            Template::WatchWithUs => format!("Watch {handle} with us over on {url} ! "),
            Template::OurFriend => {
                format!("Our friend {handle} is now live at {url} - check out the stream!")
            }
            Template::CheckOutLiveWith => {
                format!("Check out {handle} live with {category} now! {url} ")
            }
            Template::CategoryAndChill => format!("{category} and chill with {handle} ! {url} "),
            Template::WantANewStreamer => format!(
                "Want a new streamer to watch? {handle} is now live at {url} - come hang out!"
            ),
            Template::WatchPlay => format!("Watch {handle} play {category} over on {url} "),
        }
    }

    /// The short template used when the random pick is too long.
    pub fn fallback(handle: &str, url: &str) -> String {
        format!("Come and watch {handle} with us over on {url} !")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VARS: TemplateVars<'static> = TemplateVars {
        handle: "Alice",
        url: "https://twitch.tv/alicestream",
        category: "#CSGO",
    };

    #[test]
    fn test_every_template_mentions_handle_and_url() {
        for template in Template::ALL {
            let text = template.render(&VARS);
            assert!(text.contains("Alice"), "{template:?}: {text}");
            assert!(text.contains("https://twitch.tv/alicestream"), "{template:?}: {text}");
        }
    }

    #[test]
    fn test_category_templates() {
        let with_category: Vec<_> = Template::ALL
            .iter()
            .filter(|t| t.uses_category())
            .collect();
        assert!(!with_category.is_empty());

        for template in Template::ALL {
            let text = template.render(&VARS);
            assert_eq!(text.contains("#CSGO"), template.uses_category(), "{template:?}");
        }
    }

    #[test]
    fn test_fallback() {
        assert_eq!(
            Template::fallback("Alice", "https://twitch.tv/alicestream"),
            "Come and watch Alice with us over on https://twitch.tv/alicestream !"
        );
    }
}
