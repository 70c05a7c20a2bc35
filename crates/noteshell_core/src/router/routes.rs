//! Static route table.

/// Path of the login destination used for guard redirects.
pub const LOGIN_PATH: &str = "/auth";

/// View mounted when a route is entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Auth,
    Analytics,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDescriptor {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
    pub requires_auth: bool,
}

static STANDARD_ROUTES: [RouteDescriptor; 3] = [
    RouteDescriptor {
        path: "/",
        name: "Home",
        view: View::Home,
        requires_auth: true,
    },
    RouteDescriptor {
        path: LOGIN_PATH,
        name: "Auth",
        view: View::Auth,
        requires_auth: false,
    },
    RouteDescriptor {
        path: "/analytics",
        name: "Analytics",
        view: View::Analytics,
        requires_auth: true,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct RouteTable {
    routes: &'static [RouteDescriptor],
}

impl RouteTable {
    /// Home, Auth and Analytics.
    pub fn standard() -> Self {
        Self {
            routes: &STANDARD_ROUTES,
        }
    }

    pub fn all(&self) -> &'static [RouteDescriptor] {
        self.routes
    }

    /// Exact path match. A trailing slash is ignored except on `/`.
    pub fn resolve(&self, path: &str) -> Option<&'static RouteDescriptor> {
        let trimmed = path.trim();
        let normalized = match trimmed.trim_end_matches('/') {
            "" => "/",
            other => other,
        };
        self.routes.iter().find(|route| route.path == normalized)
    }

    pub fn by_name(&self, name: &str) -> Option<&'static RouteDescriptor> {
        self.routes.iter().find(|route| route.name == name)
    }
}
