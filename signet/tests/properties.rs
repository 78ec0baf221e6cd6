use signet::{
    Casts, Command, ConfigurationError, Dispatch, Error, ParameterSpec, ParsingError, Registry,
    Signature, Style, Value,
};

fn call_of<'a, R>(dispatch: Dispatch<'a, R>) -> signet::Call<'a, R> {
    match dispatch {
        Dispatch::Call(call) => call,
        Dispatch::Help(text) => panic!("expected a call, got help:\n{text}"),
    }
}

#[test]
fn positional_values_are_cast_in_declared_order() {
    let signature = Signature::extract(
        [
            ParameterSpec::new("name"),
            ParameterSpec::new("age").typed::<u8>(),
            ParameterSpec::new("ratio").typed::<f64>(),
            ParameterSpec::new("initial").typed::<char>(),
        ],
        &Casts::standard(),
    )
    .unwrap();

    let result = Style::Positional
        .parse(&signature, &["alice", "30", "0.5", "a"])
        .unwrap();

    assert_eq!(
        result.positional,
        [
            Value::from("alice"),
            Value::UInt(30),
            Value::Float(0.5),
            Value::Char('a'),
        ]
    );
}

#[test]
fn positional_counts() {
    let signature = Signature::extract(
        [
            ParameterSpec::new("a"),
            ParameterSpec::new("b"),
            ParameterSpec::new("c").default("x"),
        ],
        &Casts::standard(),
    )
    .unwrap();

    let empty: &[&str] = &[];

    for tokens in [empty, &["1"]] {
        assert!(matches!(
            Style::Positional.parse(&signature, tokens),
            Err(Error::InsufficientArguments { .. })
        ));
    }

    assert!(matches!(
        Style::Positional.parse(&signature, &["1", "2", "3", "4"]),
        Err(Error::Parsing(ParsingError::TooManyArguments { .. }))
    ));
}

#[test]
fn casting() {
    let signature = Signature::extract(
        [ParameterSpec::new("count").typed::<i64>()],
        &Casts::standard(),
    )
    .unwrap();

    assert_eq!(signature.cast("count", "5"), Ok(Value::Int(5)));

    match signature.cast("count", "abc") {
        Err(Error::Parsing(ParsingError::Cast { parameter, argument, .. })) => {
            assert_eq!(parameter, "count");
            assert_eq!(argument, "abc");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[test]
fn flags_only_function() {
    let mut registry = Registry::new();
    registry
        .register(
            Command::new("hello", |args| {
                Ok((args.get::<bool>("debug")?, args.get::<String>("name")?))
            })
            .params([ParameterSpec::flag("debug"), ParameterSpec::new("name")])
            .style(Style::Keyword),
        )
        .unwrap();

    let call = call_of(registry.setup(&["prog", "-n", "Alice"]).unwrap());
    assert_eq!(call.invoke().unwrap(), (false, "Alice".to_owned()));

    let call = call_of(registry.setup(&["prog", "-n", "Alice", "-d"]).unwrap());
    assert_eq!(call.invoke().unwrap(), (true, "Alice".to_owned()));

    assert_eq!(
        registry.setup(&["prog", "-d"]).unwrap_err(),
        Error::InsufficientArguments {
            missing: vec!["name".to_owned()]
        }
    );
}

#[test]
fn no_functions_is_a_configuration_error() {
    let registry: Registry<()> = Registry::new();

    for argv in [&["prog"][..], &["prog", "-h"], &["prog", "a", "b"]] {
        assert!(matches!(
            registry.setup(argv),
            Err(Error::Configuration(ConfigurationError::NoFunctions))
        ));
    }
}

#[test]
fn unknown_function_is_named() {
    let mut registry = Registry::new();
    registry
        .register(Command::new("foo", |_| Ok(())))
        .unwrap()
        .register(Command::new("bar", |_| Ok(())))
        .unwrap();

    let error = registry.setup(&["prog", "baz"]).unwrap_err();

    assert_eq!(error, ParsingError::UnknownFunction("baz".to_owned()).into());
    assert!(error.to_string().contains("baz"));
}

#[test]
fn usage_contains_the_synopsis() {
    for style in [Style::Positional, Style::Keyword, Style::Mixed] {
        let mut registry = Registry::new();
        registry
            .register(
                Command::new("f", |_| Ok(()))
                    .params([
                        ParameterSpec::flag("debug"),
                        ParameterSpec::new("name"),
                        ParameterSpec::new("times").typed::<u32>().default(1u32),
                        ParameterSpec::new("label").optional(),
                    ])
                    .doc("Do the thing.\n\nname: the name\ndebug: print more")
                    .style(style),
            )
            .unwrap();

        let binding = registry.get("f").unwrap();
        let synopsis = binding.synopsis().to_string();

        assert!(!synopsis.is_empty());
        assert!(
            binding.render_usage("prog").contains(&synopsis),
            "{style:?}: {synopsis:?}"
        );
    }
}

#[test]
fn empty_arguments_mean_help() {
    for style in [Style::Positional, Style::Keyword, Style::Mixed] {
        let mut registry = Registry::new();
        registry
            .register(
                Command::new("f", |_| Ok(()))
                    .param(ParameterSpec::new("needed"))
                    .style(style),
            )
            .unwrap();

        match registry.setup(&["prog"]).unwrap() {
            Dispatch::Help(text) => assert!(text.contains("Usage:"), "{text}"),
            Dispatch::Call(call) => panic!("unexpected call: {call:?}"),
        }

        // Some arguments but not enough is still an error
        if style != Style::Positional {
            assert!(registry.setup(&["prog", "--"]).is_err());
        }
    }
}

#[test]
fn bundled_booleans() {
    let signature = Signature::extract(
        [ParameterSpec::flag("debug"), ParameterSpec::flag("verbose")],
        &Casts::standard(),
    )
    .unwrap();

    for style in [Style::Keyword, Style::Mixed] {
        let result = style.parse(&signature, &["-dv"]).unwrap();

        assert_eq!(result.keywords["debug"], Value::Bool(true));
        assert_eq!(result.keywords["verbose"], Value::Bool(true));
    }
}

#[test]
fn shortcut_collisions_keep_the_first() {
    let signature = Signature::extract(
        [ParameterSpec::new("name"), ParameterSpec::flag("noisy")],
        &Casts::standard(),
    )
    .unwrap();

    assert_eq!(signature.lookup_short('n').unwrap().name(), "name");
    assert_eq!(signature.get("noisy").unwrap().short(), None);

    let result = Style::Mixed
        .parse(&signature, &["-n", "x", "--noisy"])
        .unwrap();
    assert_eq!(result.keywords["noisy"], Value::Bool(true));
}
