//! Demo dispatcher: binds one web-style and one console-style request
//! against the same resolver setup.
//!
//! Run with `cargo run --example dispatch`; set `RUST_LOG=debug` to see
//! the binder's resolution log.

use bindery::{
    Action, Binder, ParamSpec, RawParams, Resolvable, Resolved, ResolveError, ResolverRegistry,
    ResolverSpec, Transport, TypeSpec,
};
use tracing_subscriber::EnvFilter;

/// Stand-in for the host framework's request object.
struct Request {
    user_id: Option<i64>,
}

/// Domain type that resolves itself from the request.
#[derive(Debug, Default)]
struct User {
    id: i64,
}

impl Resolvable<Request> for User {
    fn resolve(&self, request: &Request, _action: &Action) -> Result<Resolved, ResolveError> {
        match request.user_id {
            Some(id) => Ok(Box::new(User { id })),
            None => Err(ResolveError::NotFound(
                "no user referenced by this request".into(),
            )),
        }
    }
}

fn registry() -> ResolverRegistry<Request> {
    ResolverRegistry::new([ResolverSpec::of::<User>()]).unwrap_or_else(|e| {
        eprintln!("dispatch: invalid resolver configuration: {e}");
        std::process::exit(1);
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let request = Request { user_id: Some(7) };

    // Web: named raw params, strict coercion, resolver for `user`.
    let web = Binder::new(Transport::Web, registry());
    let action = Action::new(
        "view",
        vec![
            ParamSpec::typed("id", TypeSpec::int()),
            ParamSpec::typed("user", TypeSpec::named("User")),
            ParamSpec::typed("page", TypeSpec::int()).with_default(1),
        ],
    );
    let mut params = RawParams::new();
    params.insert("id", "42");

    match web.bind(&action, &request, params) {
        Ok(args) => {
            println!("web bound {} args", args.len());
            println!("  id   = {:?}", args[0].as_value());
            println!("  user = {:?}", args[1].downcast_ref::<User>());
            println!("  page = {:?}", args[2].as_value());
        }
        Err(e) => {
            eprintln!("dispatch: web bind failed: {e}");
            std::process::exit(1);
        }
    }

    // Console: positional raw params, comma-separated sequences, and
    // residual passthrough for the undeclared `verbose` flag.
    let console = Binder::new(Transport::Console, registry());
    let action = Action::new(
        "import",
        vec![
            ParamSpec::untyped("source"),
            ParamSpec::typed("tags", TypeSpec::array()),
        ],
    );
    let mut params = RawParams::new();
    params.insert(0usize, "backup.json");
    params.insert(1usize, "a, b, c");
    params.insert("verbose", "1");

    match console.bind(&action, &request, params) {
        Ok(args) => {
            println!("console bound {} args", args.len());
            for (i, arg) in args.iter().enumerate() {
                println!("  [{i}] = {arg:?}");
            }
        }
        Err(e) => {
            eprintln!("dispatch: console bind failed: {e}");
            std::process::exit(1);
        }
    }
}
