//! WASAPhoto route declarations
//!
//! The front-end table went through three revisions; all of them can be
//! built so older deployments can be reproduced.

use crate::route::{RouteDef, ViewId};
use crate::table::RouteTable;
use crate::{Error, Result};
use std::fmt;
use std::str::FromStr;

pub const HOME_VIEW: ViewId = ViewId::from_static("HomeView");
pub const LOGIN_VIEW: ViewId = ViewId::from_static("LoginView");
pub const STREAM_VIEW: ViewId = ViewId::from_static("StreamView");
pub const PROFILE_VIEW: ViewId = ViewId::from_static("ProfileView");
pub const SEARCH_VIEW: ViewId = ViewId::from_static("SearchView");
pub const SETTINGS_VIEW: ViewId = ViewId::from_static("SettingsView");
pub const USERNAME_VIEW: ViewId = ViewId::from_static("UsernameView");
pub const BANS_VIEW: ViewId = ViewId::from_static("BansView");
pub const COMMENTS_VIEW: ViewId = ViewId::from_static("CommentsView");

/// Revision of the route table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Revision {
    /// Project template: placeholder links and a profile page
    Scaffold,
    /// Real views, no access control yet
    Views,
    /// Real views behind the authentication guard
    #[default]
    Guarded,
}

impl Revision {
    pub const ALL: [Revision; 3] = [Revision::Scaffold, Revision::Views, Revision::Guarded];

    pub fn as_str(&self) -> &'static str {
        match self {
            Revision::Scaffold => "scaffold",
            Revision::Views => "views",
            Revision::Guarded => "guarded",
        }
    }

    /// Declarations for this revision
    pub fn routes(&self) -> Vec<RouteDef> {
        match self {
            Revision::Scaffold => scaffold(),
            Revision::Views => views(),
            Revision::Guarded => guarded(),
        }
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Revision {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Revision::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::UnknownRevision(s.to_string()))
    }
}

impl RouteTable {
    /// Build the table of one revision
    pub fn for_revision(revision: Revision) -> Result<Self> {
        RouteTable::new(revision.routes())
    }
}

fn scaffold() -> Vec<RouteDef> {
    vec![
        RouteDef::new("/", HOME_VIEW),
        RouteDef::new("/link1", HOME_VIEW),
        RouteDef::new("/link2", HOME_VIEW),
        RouteDef::new("/some/:id/link", HOME_VIEW),
        RouteDef::new("/profile/:username", PROFILE_VIEW).name("UserProfile"),
    ]
}

fn views() -> Vec<RouteDef> {
    vec![
        RouteDef::new("/", LOGIN_VIEW).name("index"),
        RouteDef::new("/login", LOGIN_VIEW).name("login"),
        RouteDef::new("/stream", STREAM_VIEW)
            .name("stream")
            .meta("title", "Stream"),
        RouteDef::new("/profile/:profileId", PROFILE_VIEW).name("profile"),
        RouteDef::new("/search", SEARCH_VIEW).name("search"),
    ]
}

fn guarded() -> Vec<RouteDef> {
    vec![
        RouteDef::new("/", LOGIN_VIEW).name("index"),
        RouteDef::new("/login", LOGIN_VIEW).name("login"),
        RouteDef::new("/stream", STREAM_VIEW)
            .name("stream")
            .requires_auth()
            .meta("title", "Stream"),
        RouteDef::new("/profile/:profileId", PROFILE_VIEW)
            .name("profile")
            .requires_auth(),
        RouteDef::new("/search", SEARCH_VIEW)
            .name("search")
            .requires_auth(),
        RouteDef::new("/photos/:photoId/comments", COMMENTS_VIEW)
            .name("comments")
            .requires_auth(),
        RouteDef::new("/settings", SETTINGS_VIEW)
            .name("settings")
            .requires_auth()
            .children(vec![
                RouteDef::new("username", USERNAME_VIEW).name("settings-username"),
                RouteDef::new("bans", BANS_VIEW).name("settings-bans"),
            ]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::{decide, AuthContext, NavigationAction};

    #[test]
    fn test_every_revision_builds() {
        for revision in Revision::ALL {
            let table = RouteTable::for_revision(revision).unwrap();
            assert!(!table.is_empty(), "{}", revision);
        }
    }

    #[test]
    fn test_scaffold_table() {
        let table = RouteTable::for_revision(Revision::Scaffold).unwrap();
        assert_eq!(table.len(), 5);
        assert_eq!(table.resolve("/link2").unwrap().view(), &HOME_VIEW);

        let route = table.resolve("/some/abc/link").unwrap();
        assert_eq!(route.param("id"), Some("abc"));

        let route = table.resolve("/profile/mario").unwrap();
        assert_eq!(route.name.as_deref(), Some("UserProfile"));
        assert_eq!(route.param("username"), Some("mario"));
        assert!(!route.requires_auth());
    }

    #[test]
    fn test_views_table_is_unguarded() {
        let table = RouteTable::for_revision(Revision::Views).unwrap();
        assert!(table.records().all(|r| !r.meta.requires_auth));
        let stream = table.resolve("/stream").unwrap();
        assert_eq!(
            decide(stream.matched(), None, &AuthContext::anonymous()),
            NavigationAction::Proceed
        );
    }

    #[test]
    fn test_guarded_table() {
        let table = RouteTable::for_revision(Revision::Guarded).unwrap();
        assert_eq!(table.resolve("/").unwrap().view(), &LOGIN_VIEW);
        assert_eq!(table.resolve("/login").unwrap().view(), &LOGIN_VIEW);
        assert!(table.resolve("/stream").unwrap().requires_auth());
        assert_eq!(table.resolve("/settings/bans").unwrap().view(), &BANS_VIEW);
        assert!(table.resolve("/link1").is_err());
    }

    #[test]
    fn test_revision_from_str() {
        assert_eq!("guarded".parse::<Revision>().unwrap(), Revision::Guarded);
        assert_eq!("Scaffold".parse::<Revision>().unwrap(), Revision::Scaffold);
        assert!("v4".parse::<Revision>().is_err());
        assert_eq!(Revision::default(), Revision::Guarded);
    }
}
