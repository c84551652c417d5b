mod common;

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use common::{read_key, tamper, TestResult};
use jws::{
    registry::PrimitiveError, AlgorithmBinding, AlgorithmRegistry, DecodeOptions, Encoding, Error,
    Header, Jws, Key, Payload, ProviderOverride, Segment, SignOptions, VerifyOptions,
};
use serde_json::json;

async fn sign_and_verify(alg: &str, private: &Key, public: &Key, wrong: &Key) -> TestResult {
    let jws = Jws::default();
    let header = Header::new(alg);
    let payload = Payload::from("oh ćhey José!: ¬");

    let token = jws
        .sign(SignOptions::new(header.clone(), payload.clone(), private.clone()))
        .await?;

    assert!(jws.verify(token.as_str(), Some(alg), public).await?, "{alg} should verify");
    for tampered in tamper(token.as_str()) {
        assert!(!jws.verify(&tampered, Some(alg), public).await?, "{alg} tampered: {tampered}");
    }
    assert!(!jws.verify(token.as_str(), Some(alg), wrong).await?, "{alg} wrong key");

    let decoded = jws.decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(decoded.header, header);
    assert_eq!(decoded.payload, payload);
    assert_eq!(decoded.signature, token.as_str().rsplit('.').next().unwrap());

    Ok(())
}

#[tokio::test]
async fn hmac() -> TestResult {
    let secret = Key::from("sup3r s3cr3t");
    for alg in ["HS256", "HS384", "HS512"] {
        sign_and_verify(alg, &secret, &secret, &Key::from("guessed")).await?;
    }
    Ok(())
}

#[tokio::test]
async fn rsassa_pkcs1_v1_5() -> TestResult {
    let private = read_key("rsa-private")?;
    let public = read_key("rsa-public")?;
    let wrong = read_key("rsa-wrong-public")?;

    for alg in ["RS256", "RS384", "RS512"] {
        sign_and_verify(alg, &private, &public, &wrong).await?;
    }
    Ok(())
}

#[tokio::test]
async fn ecdsa() -> TestResult {
    for (alg, curve) in [("ES256", "ec256"), ("ES384", "ec384"), ("ES512", "ec512")] {
        sign_and_verify(
            alg,
            &read_key(&format!("{curve}-private"))?,
            &read_key(&format!("{curve}-public"))?,
            &read_key(&format!("{curve}-wrong-public"))?,
        )
        .await?;
    }
    Ok(())
}

#[tokio::test]
async fn legacy_key_formats() -> TestResult {
    let jws = Jws::default();

    let token = jws
        .sign(SignOptions::new(Header::new("RS256"), "pkcs1", read_key("rsa-private-pkcs1")?))
        .await?;
    assert!(jws.verify(token.as_str(), Some("RS256"), &read_key("rsa-public")?).await?);

    let token = jws
        .sign(SignOptions::new(Header::new("ES256"), "sec1", read_key("ec256-private-sec1")?))
        .await?;
    assert!(jws.verify(token.as_str(), Some("ES256"), &read_key("ec256-public")?).await?);

    Ok(())
}

#[tokio::test]
async fn private_key_verifies_its_own_signatures() -> TestResult {
    let jws = Jws::default();
    let private = read_key("ec384-private")?;

    let token = jws
        .sign(SignOptions::new(Header::new("ES384"), "self", private.clone()))
        .await?;
    assert!(jws.verify(token.as_str(), Some("ES384"), &private).await?);

    Ok(())
}

#[tokio::test]
async fn algorithm_isolation() -> TestResult {
    let jws = Jws::default();
    let secret = Key::from("secret");

    let token = jws.sign(SignOptions::with_secret("payload", secret.clone())).await?;
    assert!(!jws.verify(token.as_str(), Some("HS384"), &secret).await?);
    assert!(!jws.verify(token.as_str(), Some("HS512"), &secret).await?);

    let private = read_key("rsa-private")?;
    let public = read_key("rsa-public")?;
    let token = jws.sign(SignOptions::new(Header::new("RS512"), "payload", private)).await?;
    assert!(!jws.verify(token.as_str(), Some("RS256"), &public).await?);

    Ok(())
}

#[tokio::test]
async fn unsecured_tokens() -> TestResult {
    let jws = Jws::default();
    let token = jws
        .sign(SignOptions::new(Header::new("none"), "unsigned", Key::empty()))
        .await?;

    assert!(token.as_str().ends_with('.'));
    assert!(jws.verify(token.as_str(), Some("none"), &Key::empty()).await?);
    assert!(jws.verify(token.as_str(), Some("none"), &Key::from("anything")).await?);

    let decoded = jws::decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(decoded.payload, Payload::from("unsigned"));
    assert_eq!(decoded.signature, "");

    Ok(())
}

#[tokio::test]
async fn the_token_does_not_pick_its_algorithm() -> TestResult {
    let jws = Jws::default();
    let token = jws
        .sign(SignOptions::new(Header::new("none"), "forged", Key::empty()))
        .await?;

    // an unsigned token must not pass as an HMAC one
    assert!(!jws.verify(token.as_str(), Some("HS256"), &Key::from("secret")).await?);
    assert_eq!(jws::embedded_algorithm(token.as_str())?, "none");

    Ok(())
}

#[tokio::test]
async fn missing_or_unknown_algorithm() -> TestResult {
    let jws = Jws::default();
    let key = Key::from("secret");
    let token = jws.sign(SignOptions::with_secret("payload", key.clone())).await?;

    assert!(matches!(
        jws.verify(token.as_str(), None, &key).await,
        Err(Error::MissingAlgorithm { header: None })
    ));
    assert!(matches!(
        jws.verify(token.as_str(), Some(""), &key).await,
        Err(Error::MissingAlgorithm { .. })
    ));

    let err = jws.verify(token.as_str(), Some("whatever"), &key).await.unwrap_err();
    assert_eq!(err.to_string(), "\"whatever\" is not a valid algorithm");

    let err = jws
        .sign(SignOptions::new(Header::default(), "payload", key.clone()))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MissingAlgorithm { header: Some(_) }));

    let err = jws
        .sign(SignOptions::new(Header::new("HS1"), "payload", key))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnknownAlgorithm { algorithm } if algorithm == "HS1"));

    Ok(())
}

#[tokio::test]
async fn malformed_tokens_do_not_verify() -> TestResult {
    let jws = Jws::default();
    let key = Key::from("secret");

    for token in ["", "plainstring", "not.a.token!!", "http://sub.domain.org"] {
        assert!(!jws.verify(token, Some("HS256"), &key).await?, "{token:?}");
    }
    Ok(())
}

#[tokio::test]
async fn key_of_the_wrong_kind_is_a_primitive_failure() -> TestResult {
    let jws = Jws::default();

    let err = jws
        .sign(SignOptions::new(Header::new("RS256"), "payload", "not a pem"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PrimitiveFailure { algorithm, .. } if algorithm == "RS256"));

    let token = jws
        .sign(SignOptions::new(Header::new("ES256"), "payload", read_key("ec256-private")?))
        .await?;
    let err = jws
        .verify(token.as_str(), Some("ES256"), &read_key("rsa-public")?)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::PrimitiveFailure { .. }));

    Ok(())
}

#[tokio::test]
async fn json_payloads() -> TestResult {
    let jws = Jws::default();
    let key = Key::from("secret");
    let claims = json!({"sub": "1234567890", "admin": true, "iat": 1516239022});

    let jwt = Header::new("HS256").with("typ", "JWT");
    let token = jws
        .sign(SignOptions::new(jwt, claims.clone(), key.clone()))
        .await?;
    let decoded = jws::decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(decoded.payload, Payload::Json(claims.clone()));

    // without `typ` the payload is text, unless JSON is asked for
    let token = jws.sign(SignOptions::with_secret(claims.clone(), key)).await?;
    let decoded = jws::decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(decoded.payload.as_text(), Some(claims.to_string().as_str()));

    let decoded = jws::decode(token.as_str(), &DecodeOptions::json())?.unwrap();
    assert_eq!(decoded.payload.as_json(), Some(&claims));

    Ok(())
}

#[tokio::test]
async fn big_integers_survive_decoding() -> TestResult {
    let jws = Jws::default();
    let header = Header::new("HS256").with("typ", "JWT");
    let token = jws
        .sign(SignOptions::new(
            header,
            r#"{"safe":9007199254740991,"id":9007199254740993}"#,
            "secret",
        ))
        .await?;

    let decoded = jws::decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(
        decoded.payload,
        Payload::Json(json!({"safe": 9007199254740991_u64, "id": "9007199254740993"}))
    );

    Ok(())
}

#[test]
fn decode_rejects_what_is_not_a_token() -> TestResult {
    for token in ["", "plainstring", "not.a.token!!", "some garbage string", "http://sub.domain.org"] {
        assert_eq!(jws::decode(token, &DecodeOptions::default())?, None, "{token:?}");
    }

    // the header decodes to `hi`
    assert_eq!(jws::decode("aGk.aGk.", &DecodeOptions::default())?, None);

    Ok(())
}

#[test]
fn decode_reports_invalid_json_bodies() {
    // {"alg":"none","typ":"JWT"} . "hi"
    let token = "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.aGk.";

    assert!(matches!(
        jws::decode(token, &DecodeOptions::default()),
        Err(Error::ParseFailure { segment: Segment::Payload, .. })
    ));
}

#[test]
fn is_valid() {
    assert!(jws::is_valid("eyJhbGciOiJDVVNUT00ifQ.aGk.SIGNED"));
    assert!(jws::is_valid("eyJhbGciOiJub25lIn0.aGk."));
    assert!(!jws::is_valid("http://sub.domain.org"));
    assert!(!jws::is_valid("aGk.aGk.aGk"));
    assert!(!Jws::default().is_valid(""));
}

#[tokio::test]
async fn payload_encodings() -> TestResult {
    let jws = Jws::default();

    let token = jws
        .sign(SignOptions::with_secret("é", "secret").with_encoding(Encoding::Latin1))
        .await?;
    let decoded = jws::decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(decoded.payload, Payload::Bytes(vec![0xe9]));

    let token = jws
        .sign(SignOptions::with_secret("6869", "secret").with_encoding(Encoding::Hex))
        .await?;
    let decoded = jws::decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(decoded.payload, Payload::from("hi"));

    let err = jws
        .sign(SignOptions::with_secret("é", "secret").with_encoding(Encoding::Ascii))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidEncoding { encoding: Encoding::Ascii, .. }));

    Ok(())
}

/// Signs with `key` repetitions of `hi`.
fn repeat_hi(name: &str) -> AlgorithmBinding {
    fn signature(key: &Key) -> Result<String, PrimitiveError> {
        let count: usize = std::str::from_utf8(key.expose())?.parse()?;
        Ok("hi".repeat(count))
    }

    AlgorithmBinding::from_fns(
        name,
        |_, key| signature(key),
        |_, sig, key| Ok(sig == signature(key)?),
    )
}

#[tokio::test]
async fn custom_registry() -> TestResult {
    let registry = AlgorithmRegistry::builder()
        .with_builtins()
        .register(repeat_hi("some-custom-algorithm"))
        .build();
    let jws = Jws::new(Arc::new(registry));

    let token = jws
        .sign(SignOptions::new(Header::new("some-custom-algorithm"), "hello", "3"))
        .await?;
    assert!(jws.is_valid(token.as_str()));
    assert!(jws.verify(token.as_str(), Some("some-custom-algorithm"), &Key::from("3")).await?);

    let truncated = &token.as_str()[..token.as_str().len() - 1];
    assert!(!jws.verify(truncated, Some("some-custom-algorithm"), &Key::from("3")).await?);

    let decoded = jws.decode(token.as_str(), &DecodeOptions::default())?.unwrap();
    assert_eq!(decoded.header.algorithm(), Some("some-custom-algorithm"));
    assert_eq!(decoded.payload, Payload::from("hello"));
    assert_eq!(decoded.signature, "hihihi");

    // the built-ins are still there
    let token = jws.sign(SignOptions::with_secret("x", "secret")).await?;
    assert!(jws.verify(token.as_str(), Some("HS256"), &Key::from("secret")).await?);

    Ok(())
}

#[tokio::test]
async fn per_call_provider() -> TestResult {
    let sign_calls = Arc::new(AtomicUsize::new(0));
    let verify_calls = Arc::new(AtomicUsize::new(0));

    let custom = {
        let (sign_calls, verify_calls) = (Arc::clone(&sign_calls), Arc::clone(&verify_calls));
        AlgorithmBinding::from_fns(
            "CUSTOM",
            move |_, key| {
                sign_calls.fetch_add(1, Ordering::SeqCst);
                if key.is_empty() {
                    return Err("unable to sign".into());
                }
                Ok("SIGNED".to_owned())
            },
            move |_, sig, key| {
                verify_calls.fetch_add(1, Ordering::SeqCst);
                if key.is_empty() {
                    return Err("unable to verify".into());
                }
                Ok(sig == "SIGNED")
            },
        )
    };
    let provider = ProviderOverride::new(move |alg: &str| (alg == "CUSTOM").then(|| custom.clone()));

    let jws = Jws::default();
    let options = SignOptions::new(Header::new("CUSTOM"), "hi", "key").with_provider(provider.clone());
    let token = jws.sign(options.clone()).await?;
    assert_eq!(sign_calls.load(Ordering::SeqCst), 1);
    assert_eq!(token, "eyJhbGciOiJDVVNUT00ifQ.aGk.SIGNED");

    let mut failing = options;
    failing.key = Key::empty();
    let err = jws.sign(failing).await.unwrap_err();
    assert_eq!(sign_calls.load(Ordering::SeqCst), 2);
    assert!(matches!(&err, Error::PrimitiveFailure { algorithm, .. } if algorithm == "CUSTOM"));
    assert_eq!(std::error::Error::source(&err).unwrap().to_string(), "unable to sign");

    let verify = VerifyOptions::new("CUSTOM", "key").with_provider(provider.clone());
    assert!(jws.verify_with(token.as_str(), &verify).await?);
    assert_eq!(verify_calls.load(Ordering::SeqCst), 1);

    let verify = VerifyOptions::new("CUSTOM", Key::empty()).with_provider(provider);
    assert!(jws.verify_with(token.as_str(), &verify).await.is_err());
    assert_eq!(verify_calls.load(Ordering::SeqCst), 2);

    // the default engine knows nothing about it
    assert!(matches!(
        jws.verify(token.as_str(), Some("CUSTOM"), &Key::from("key")).await,
        Err(Error::UnknownAlgorithm { .. })
    ));

    Ok(())
}

#[tokio::test]
#[tracing_test::traced_test]
async fn provider_fallback() -> TestResult {
    let declines = |_: &str| -> Option<AlgorithmBinding> { None };

    let strict = Jws::default().with_provider(ProviderOverride::new(declines));
    assert!(matches!(
        strict.sign(SignOptions::with_secret("hi", "secret")).await,
        Err(Error::UnknownAlgorithm { .. })
    ));

    let lenient = Jws::default().with_provider(ProviderOverride::new(declines).with_fallback());
    let token = lenient.sign(SignOptions::with_secret("hi", "secret")).await?;
    assert!(lenient.verify(token.as_str(), Some("HS256"), &Key::from("secret")).await?);
    assert!(logs_contain("falling back to registry"));

    Ok(())
}

#[tokio::test]
async fn per_call_provider_wins_over_engine_provider() -> TestResult {
    let fixed = |signature: &'static str| {
        AlgorithmBinding::from_fns("HS256", move |_, _| Ok(signature.to_owned()), |_, _, _| Ok(true))
    };
    let engine = ProviderOverride::new(move |_: &str| Some(fixed("ENGINE")));
    let call = ProviderOverride::new(move |_: &str| Some(fixed("CALL")));

    let jws = Jws::default().with_provider(engine);
    let token = jws.sign(SignOptions::with_secret("hi", "k")).await?;
    assert!(token.as_str().ends_with(".ENGINE"));

    let token = jws
        .sign(SignOptions::with_secret("hi", "k").with_provider(call))
        .await?;
    assert!(token.as_str().ends_with(".CALL"));

    Ok(())
}
