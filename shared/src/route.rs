/// Pages of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Reviews,
    ReviewDetail(String),
    Dashboard,
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            [] | ["reviews"] => Route::Reviews,
            ["reviews", task_id] => match urlencoding::decode(task_id) {
                Ok(task_id) => Route::ReviewDetail(task_id.into_owned()),
                Err(_) => Route::NotFound,
            },
            ["dashboard"] => Route::Dashboard,
            _ => Route::NotFound,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Reviews => "/reviews".to_string(),
            Route::ReviewDetail(task_id) => format!("/reviews/{}", urlencoding::encode(task_id)),
            Route::Dashboard => "/dashboard".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(Route::parse("/"), Route::Reviews);
        assert_eq!(Route::parse("/reviews/"), Route::Reviews);
        assert_eq!(Route::parse("/reviews/abc-1?tab=x"), Route::ReviewDetail("abc-1".into()));
        assert_eq!(Route::parse("/dashboard"), Route::Dashboard);
        assert_eq!(Route::parse("/reviews/a/b"), Route::NotFound);
        assert_eq!(Route::parse("/settings"), Route::NotFound);
    }

    #[test]
    fn detail_path_survives_encoding() {
        let route = Route::ReviewDetail("task 7/b".into());
        assert_eq!(route.to_path(), "/reviews/task%207%2Fb");
        assert_eq!(Route::parse(&route.to_path()), route);
    }
}
