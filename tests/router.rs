use regex_router::{Dispatch, Method, Router, RouterError, Strictness};

use std::sync::Arc;
use std::thread;

#[derive(Debug, PartialEq)]
enum Outcome {
    Found(usize, Vec<(String, String)>),
    MethodNotAllowed,
    NotFound,
}

fn outcome(router: &Router<usize>, method: &str, path: &str) -> Outcome {
    let method = Method::from_bytes(method.as_bytes()).unwrap();
    match router.find(&method, path) {
        Dispatch::Found(&data, caps) => {
            let caps = caps
                .iter()
                .map(|(k, v)| (k.to_owned(), v.to_owned()))
                .collect();
            Outcome::Found(data, caps)
        }
        Dispatch::MethodNotAllowed => Outcome::MethodNotAllowed,
        Dispatch::NotFound => Outcome::NotFound,
    }
}

fn found(data: usize, caps: &[(&str, &str)]) -> Outcome {
    let caps = caps
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    Outcome::Found(data, caps)
}

#[test]
fn router_fruits() {
    let mut router: Router<usize> = Router::new();
    router
        .insert("/fruits", "*", 1)
        .insert(r"/fruits/{name:\d+}", "*", 2)
        .insert("/fruits/{name}", "GET", 3)
        .insert("/fruits/{name}", "DELETE", 4);

    let cases: &[(&str, &str, Outcome)] = &[
        ("POST", "/fruits", found(1, &[])),
        ("GET", "/fruits", found(1, &[])),
        ("GET", "/fruits/apple", found(3, &[("name", "apple")])),
        ("PUT", "/fruits/321", found(2, &[("name", "321")])),
        ("DELETE", "/fruits/apple", found(4, &[("name", "apple")])),
        ("PUT", "/fruits/apple", Outcome::MethodNotAllowed),
        ("GET", "/car/land-rover", Outcome::NotFound),
    ];

    for (method, path, want) in cases {
        assert_eq!(&outcome(&router, method, path), want, "{} {}", method, path);
    }
}

#[test]
fn router_first_declared_wins() {
    let mut router: Router<usize> = Router::new();
    router
        .insert(r"/x/{w:\w+}/{n:\d+}", "GET", 1)
        .insert(r"/x/{n:\d+}/{w:\w+}", "GET", 2);

    assert_eq!(
        outcome(&router, "GET", "/x/foo/321"),
        found(1, &[("w", "foo"), ("n", "321")])
    );
    assert_eq!(
        outcome(&router, "GET", "/x/321/foo"),
        found(2, &[("n", "321"), ("w", "foo")])
    );
    assert_eq!(
        outcome(&router, "GET", "/x/321/654"),
        found(1, &[("w", "321"), ("n", "654")])
    );
}

#[test]
fn router_method_mismatch_keeps_scanning() {
    let mut router: Router<usize> = Router::new();
    router
        .insert("/x/42", "GET", 1)
        .insert("/x/{id}", "POST", 2)
        .insert("/x/42", "*", 3);

    assert_eq!(outcome(&router, "GET", "/x/42"), found(1, &[]));
    assert_eq!(outcome(&router, "POST", "/x/42"), found(2, &[("id", "42")]));
    assert_eq!(outcome(&router, "PATCH", "/x/42"), found(3, &[]));
    assert_eq!(outcome(&router, "PATCH", "/x/43"), Outcome::MethodNotAllowed);
}

#[test]
fn router_dispatch_accessors() {
    let mut router: Router<usize> = Router::new();
    router.insert("/books/{id}", "GET", 7);

    let found = router.find(&Method::GET, "/books/1");
    assert!(found.is_found());
    assert_eq!(found.data(), Some(&7));

    let not_allowed = router.find(&Method::PUT, "/books/1");
    assert!(!not_allowed.is_found());
    assert_eq!(not_allowed.data(), None);

    let not_found = router.find(&Method::GET, "/cars");
    assert!(!not_found.is_found());
    assert_eq!(not_found.data(), None);
}

#[test]
fn router_empty() {
    let router: Router<usize> = Router::new();
    assert!(router.is_empty());
    for method in &["GET", "POST", "DELETE"] {
        for path in &["/", "", "/anything", "/a/b/c"] {
            assert_eq!(outcome(&router, method, path), Outcome::NotFound);
        }
    }
}

#[test]
fn router_root() {
    let mut router: Router<usize> = Router::new();
    router.insert("/", "GET", 1);

    assert_eq!(outcome(&router, "GET", "/"), found(1, &[]));
    assert_eq!(outcome(&router, "POST", "/"), Outcome::MethodNotAllowed);
    assert_eq!(outcome(&router, "GET", "/missing"), Outcome::NotFound);
}

#[test]
fn router_whole_path_only() {
    let mut router: Router<usize> = Router::new();
    router.insert("/hello/{name}", "GET", 1);

    assert_eq!(
        outcome(&router, "GET", "/hello/world"),
        found(1, &[("name", "world")])
    );
    assert_eq!(outcome(&router, "GET", "/hello/world/asd"), Outcome::NotFound);
    assert_eq!(outcome(&router, "GET", "/hello"), Outcome::NotFound);
    assert_eq!(outcome(&router, "GET", "/hello/"), Outcome::NotFound);
    assert_eq!(outcome(&router, "GET", "/api/hello/world"), Outcome::NotFound);
}

#[test]
fn router_lowercase_methods() {
    let mut router: Router<usize> = Router::new();
    router.insert("/books", " get , post ", 1);

    assert_eq!(outcome(&router, "GET", "/books"), found(1, &[]));
    assert_eq!(outcome(&router, "POST", "/books"), found(1, &[]));
    assert_eq!(outcome(&router, "PUT", "/books"), Outcome::MethodNotAllowed);
}

#[test]
fn router_from_routes() {
    let routes = vec![
        ("/books", "GET", 1),
        ("/books", "POST", 2),
        ("/books/{book-id}", "GET,PUT", 3),
    ];
    let bulk = Router::from_routes(routes.clone()).unwrap();

    let mut incremental: Router<usize> = Router::new();
    for (pattern, methods, data) in routes {
        incremental.insert(pattern, methods, data);
    }

    let lhs: Vec<_> = bulk.iter().map(|(p, m, d)| (p, m.to_string(), *d)).collect();
    let rhs: Vec<_> = incremental
        .iter()
        .map(|(p, m, d)| (p, m.to_string(), *d))
        .collect();
    assert_eq!(lhs, rhs);

    for (method, path) in &[("GET", "/books/1"), ("POST", "/books"), ("DELETE", "/books")] {
        assert_eq!(
            outcome(&bulk, method, path),
            outcome(&incremental, method, path)
        );
    }
}

#[test]
fn router_construction_errors() {
    let mut router: Router<usize> = Router::new();

    assert!(matches!(
        router.try_insert("/a/{n:[0-9}", "GET", 1),
        Err(RouterError::InvalidPattern { .. })
    ));
    assert!(matches!(
        router.try_insert("/a/{n", "GET", 1),
        Err(RouterError::UnclosedPlaceholder { .. })
    ));
    assert!(matches!(
        router.try_insert("/a", "GET POST", 1),
        Err(RouterError::InvalidMethod { .. })
    ));
    assert!(router.is_empty());

    let err = Router::from_routes(vec![("/ok", "GET", 1), ("/bad/{", "GET", 2)]).unwrap_err();
    assert!(err.to_string().contains("/bad/{"));
}

#[test]
#[should_panic(expected = "invalid routing path")]
fn router_insert_panics_on_invalid_pattern() {
    let mut router: Router<usize> = Router::new();
    router.insert("/a/{n:(}", "GET", 1);
}

#[test]
fn router_strictness() {
    let mut router: Router<usize> = Router::new();
    assert_eq!(router.strictness(), Strictness::Permissive);
    assert!(router.try_insert("/a", "GET,GET", 1).is_ok());
    assert!(router.try_insert("/a", "GET", 2).is_ok());

    let mut router: Router<usize> = Router::new().with_strictness(Strictness::Strict);
    assert_eq!(router.strictness(), Strictness::Strict);
    assert!(matches!(
        router.try_insert("/a", "GET,get", 1),
        Err(RouterError::DuplicateMethod { .. })
    ));
    assert!(router.try_insert("/a", "GET", 1).is_ok());
    assert!(router.try_insert("/a", "POST", 2).is_ok());
    assert!(matches!(
        router.try_insert("/a", "PUT,POST", 3),
        Err(RouterError::UnreachableRoute { shadowed_by: 1, .. })
    ));
    assert!(matches!(
        router.try_insert("/a", "*", 4),
        Err(RouterError::UnreachableRoute { shadowed_by: 0, .. })
    ));
    assert!(router.try_insert("/{a}", "*", 5).is_ok());
    assert_eq!(router.len(), 3);
}

#[test]
fn router_shared_between_threads() {
    let mut router: Router<usize> = Router::new();
    router
        .insert("/books", "GET", 1)
        .insert("/books/{id}", "GET", 2);
    for i in 0..50 {
        router.insert(&format!("/number/{}/{{action}}", i), "*", 100 + i);
    }
    let router = Arc::new(router);

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let router = Arc::clone(&router);
            thread::spawn(move || {
                for i in 0..200 {
                    let n = (t * 200 + i) % 50;
                    let path = format!("/number/{}/run", n);
                    assert_eq!(
                        outcome(&router, "POST", &path),
                        found(100 + n, &[("action", "run")])
                    );
                    assert_eq!(outcome(&router, "POST", "/books"), Outcome::MethodNotAllowed);
                }
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }
}
