use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use serde::Serialize;

use crate::session::Role;

/// Where every unmatched path is sent.
pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const LOJISTA_ONLY: &[Role] = &[Role::Lojista];
const USER_ONLY: &[Role] = &[Role::User];

/// Pages the shell can mount. The page components themselves live in the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    Login,
    Register,
    Setup,
    Dashboard,
    AdminLojistas,
    AdminCategories,
    AdminAuctions,
    AvailableAuctions,
    MyProposals,
    CreateAuction,
    MyAuctions,
    AuctionDetail,
}

impl Page {
    pub fn as_str(&self) -> &'static str {
        match self {
            Page::Login => "login",
            Page::Register => "register",
            Page::Setup => "setup",
            Page::Dashboard => "dashboard",
            Page::AdminLojistas => "admin-lojistas",
            Page::AdminCategories => "admin-categories",
            Page::AdminAuctions => "admin-auctions",
            Page::AvailableAuctions => "available-auctions",
            Page::MyProposals => "my-proposals",
            Page::CreateAuction => "create-auction",
            Page::MyAuctions => "my-auctions",
            Page::AuctionDetail => "auction-detail",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Entrar",
            Page::Register => "Cadastro",
            Page::Setup => "Configuracao inicial",
            Page::Dashboard => "Dashboard",
            Page::AdminLojistas => "Lojistas",
            Page::AdminCategories => "Categorias",
            Page::AdminAuctions => "Leiloes",
            Page::AvailableAuctions => "Leiloes disponiveis",
            Page::MyProposals => "Minhas propostas",
            Page::CreateAuction => "Novo leilao",
            Page::MyAuctions => "Meus leiloes",
            Page::AuctionDetail => "Leilao",
        }
    }

    /// Roles allowed inside the protected layout; `None` means every role.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            Page::AdminLojistas | Page::AdminCategories | Page::AdminAuctions => Some(ADMIN_ONLY),
            Page::AvailableAuctions | Page::MyProposals => Some(LOJISTA_ONLY),
            Page::CreateAuction | Page::MyAuctions => Some(USER_ONLY),
            _ => None,
        }
    }

    pub fn visible_to(&self, role: Role) -> bool {
        self.allowed_roles().map_or(true, |roles| roles.contains(&role))
    }
}

/// How a route is guarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    /// Sign-in and registration: only for visitors without a session.
    VisitorOnly,
    /// Rendered whatever the session state.
    Unconditional,
    /// Nested under the protected layout.
    Protected,
}

impl Access {
    pub fn as_str(&self) -> &'static str {
        match self {
            Access::VisitorOnly => "visitor_only",
            Access::Unconditional => "unconditional",
            Access::Protected => "protected",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(&'static str),
    Param(&'static str),
}

#[derive(Debug, Clone)]
struct RouteDef {
    pattern: &'static str,
    segments: Vec<Segment>,
    page: Page,
    access: Access,
}

/// A matched route with its percent-decoded, otherwise unvalidated parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteMatch {
    pub pattern: &'static str,
    pub page: Page,
    pub access: Access,
    pub params: BTreeMap<&'static str, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Matched(RouteMatch),
    /// No route matched; replace the location with `to`.
    Fallback { to: &'static str },
}

/// Static route table.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::dashboard()
    }
}

impl RouteTable {
    /// The marketplace dashboard's routes.
    pub fn dashboard() -> Self {
        let mut table = RouteTable { routes: Vec::new() };
        table
            .add("/login", Page::Login, Access::VisitorOnly)
            .add("/register", Page::Register, Access::VisitorOnly)
            .add("/setup", Page::Setup, Access::Unconditional)
            .add("/", Page::Dashboard, Access::Protected)
            .add("/lojistas", Page::AdminLojistas, Access::Protected)
            .add("/categorias", Page::AdminCategories, Access::Protected)
            .add("/admin-leiloes", Page::AdminAuctions, Access::Protected)
            .add("/leiloes", Page::AvailableAuctions, Access::Protected)
            .add("/propostas", Page::MyProposals, Access::Protected)
            .add("/novo-leilao", Page::CreateAuction, Access::Protected)
            .add("/meus-leiloes", Page::MyAuctions, Access::Protected)
            .add("/leilao/:id", Page::AuctionDetail, Access::Protected);
        table
    }

    fn add(&mut self, pattern: &'static str, page: Page, access: Access) -> &mut Self {
        let segments = pattern
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| match s.strip_prefix(':') {
                Some(name) => Segment::Param(name),
                None => Segment::Literal(s),
            })
            .collect();
        self.routes.push(RouteDef {
            pattern,
            segments,
            page,
            access,
        });
        self
    }

    /// Protected pages in declaration order, for the layout menu.
    pub fn protected_pages(&self) -> impl Iterator<Item = (&'static str, Page)> + '_ {
        self.routes
            .iter()
            .filter(|r| r.access == Access::Protected)
            .map(|r| (r.pattern, r.page))
    }

    /// Matches `path` (query and fragment ignored). Literals compare
    /// case-insensitively; a parameter takes exactly one non-empty segment.
    pub fn resolve(&self, path: &str) -> Resolution {
        let path = path
            .split(&['?', '#'][..])
            .next()
            .unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        for route in &self.routes {
            if route.segments.len() != segments.len() {
                continue;
            }
            let mut params = BTreeMap::new();
            let matched = route
                .segments
                .iter()
                .zip(&segments)
                .all(|(pattern, actual)| match pattern {
                    Segment::Literal(lit) => lit.eq_ignore_ascii_case(actual),
                    Segment::Param(name) => {
                        let value = percent_decode_str(actual).decode_utf8_lossy();
                        params.insert(*name, value.into_owned());
                        true
                    }
                });
            if matched {
                return Resolution::Matched(RouteMatch {
                    pattern: route.pattern,
                    page: route.page,
                    access: route.access,
                    params,
                });
            }
        }
        Resolution::Fallback { to: ROOT_PATH }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(path: &str) -> RouteMatch {
        match RouteTable::dashboard().resolve(path) {
            Resolution::Matched(m) => m,
            other => panic!("{} should match, got {:?}", path, other),
        }
    }

    #[test]
    fn classifies_every_declared_path() {
        assert_eq!(matched("/login").access, Access::VisitorOnly);
        assert_eq!(matched("/register").access, Access::VisitorOnly);
        assert_eq!(matched("/setup").access, Access::Unconditional);
        for path in [
            "/",
            "/lojistas",
            "/categorias",
            "/admin-leiloes",
            "/leiloes",
            "/propostas",
            "/novo-leilao",
            "/meus-leiloes",
            "/leilao/42",
        ] {
            assert_eq!(matched(path).access, Access::Protected, "{}", path);
        }
    }

    #[test]
    fn auction_detail_passes_raw_id() {
        let m = matched("/leilao/not-a-number");
        assert_eq!(m.page, Page::AuctionDetail);
        assert_eq!(m.params.get("id").map(String::as_str), Some("not-a-number"));
    }

    #[test]
    fn auction_detail_id_is_percent_decoded() {
        assert_eq!(matched("/leilao/a%20b").params["id"], "a b");
        assert_eq!(matched("/leilao/caf%C3%A9").params["id"], "café");
        assert_eq!(matched("/leilao/100%").params["id"], "100%");
    }

    #[test]
    fn unknown_paths_fall_back_to_root() {
        let table = RouteTable::dashboard();
        for path in ["/nonexistent", "/leilao", "/leilao/1/extra", "/login/again"] {
            assert_eq!(
                table.resolve(path),
                Resolution::Fallback { to: ROOT_PATH },
                "{}",
                path
            );
        }
    }

    #[test]
    fn matching_ignores_case_slashes_and_query() {
        assert_eq!(matched("/LOGIN").page, Page::Login);
        assert_eq!(matched("/categorias/").page, Page::AdminCategories);
        assert_eq!(matched("//propostas").page, Page::MyProposals);
        assert_eq!(matched("/register?ref=home").page, Page::Register);
        assert_eq!(matched("").page, Page::Dashboard);
    }

    #[test]
    fn role_visibility() {
        assert!(Page::Dashboard.visible_to(Role::Lojista));
        assert!(Page::AuctionDetail.visible_to(Role::Admin));
        assert!(Page::AdminLojistas.visible_to(Role::Admin));
        assert!(!Page::AdminLojistas.visible_to(Role::User));
        assert!(Page::MyProposals.visible_to(Role::Lojista));
        assert!(!Page::MyProposals.visible_to(Role::Admin));
        assert!(Page::CreateAuction.visible_to(Role::User));
        assert!(!Page::CreateAuction.visible_to(Role::Lojista));
    }

    #[test]
    fn menu_lists_protected_pages_in_order() {
        let pages: Vec<_> = RouteTable::dashboard().protected_pages().collect();
        assert_eq!(pages.len(), 9);
        assert_eq!(pages[0], ("/", Page::Dashboard));
        assert_eq!(pages[7], ("/meus-leiloes", Page::MyAuctions));
    }
}
