//! Route tables.
//!
//! A flat list of every registered route, primary paths first and aliases
//! after them, in declaration order. Router generators iterate it directly.

use apimodel_define::{ApiModel, HttpMethod};
use serde::Serialize;

/// One registered route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub method: HttpMethod,
    /// Absolute route path.
    pub path: String,
    /// Handler function name.
    pub handler: String,
    pub group: String,
    /// Auth middleware, already resolved through the auth map.
    pub auth: Option<String>,
    /// Whether `path` comes from an `- alias:` line.
    pub alias: bool,
}

/// Builds the route table for a model.
///
/// ## Examples
///
/// ```
/// use apimodel_gen::{compile, CompileOptions};
/// use apimodel_gen::routes::route_table;
///
/// let source = "root api\nuser\n    info GET none\n        - alias: /info\n";
/// let model = compile(source, &CompileOptions::default()).unwrap();
/// let routes = route_table(&model);
///
/// assert_eq!(routes[0].path, "/api/v1/user/info");
/// assert_eq!(routes[1].path, "/info");
/// assert!(routes[1].alias);
/// ```
pub fn route_table(model: &ApiModel) -> Vec<Route> {
    let meta = model.meta();
    let mut routes = Vec::with_capacity(model.endpoint_count());

    for endpoint in model.endpoints() {
        let auth = endpoint
            .auth
            .as_deref()
            .map(|tag| meta.resolve_auth(tag).to_string());
        let route = |path: String, alias: bool| Route {
            method: endpoint.method,
            path,
            handler: endpoint.handler_name(),
            group: endpoint.group.clone(),
            auth: auth.clone(),
            alias,
        };

        routes.push(route(endpoint.route_path(&model.prefix, &model.version), false));
        routes.extend(endpoint.aliases.iter().map(|alias| route(alias.clone(), true)));
    }
    routes
}

#[cfg(test)]
mod tests {
    use super::*;
    use apimodel_define::{Endpoint, Group};

    fn model() -> ApiModel {
        let mut create = Endpoint::new("create", "user");
        create.method = HttpMethod::Post;
        create.auth = Some("user".to_string());
        create.aliases = vec!["/user/new".to_string(), "/register".to_string()];

        let mut files = Endpoint::new("files.*", "user");
        files.auth = Some("AdminAuth".to_string());

        let mut group = Group::new("user");
        group.endpoints = vec![create, files];

        let mut model = ApiModel::new("shop", "v2");
        model.groups.push(group);
        model
            .meta
            .auth_map
            .insert("user".to_string(), "UserAuth".to_string());
        model
    }

    #[test]
    fn aliases_follow_their_primary_route() {
        let routes = route_table(&model());
        let paths: Vec<&str> = routes.iter().map(|r| r.path.as_str()).collect();
        assert_eq!(
            paths,
            vec!["/shop/v2/user/create", "/user/new", "/register", "/shop/v2/user/files/*"]
        );
        assert_eq!(routes.iter().filter(|r| r.alias).count(), 2);
        assert!(routes.iter().take(3).all(|r| r.handler == "CreateApi"));
    }

    #[test]
    fn auth_is_resolved_through_the_map() {
        let routes = route_table(&model());
        assert_eq!(routes[0].auth.as_deref(), Some("UserAuth"));
        assert_eq!(routes[2].auth.as_deref(), Some("UserAuth"));
        assert_eq!(routes[3].auth.as_deref(), Some("AdminAuth"));
    }

    #[test]
    fn wildcard_handler_drops_the_star() {
        let routes = route_table(&model());
        assert_eq!(routes[3].handler, "FilesApi");
        assert_eq!(routes[3].method, HttpMethod::Get);
    }
}
