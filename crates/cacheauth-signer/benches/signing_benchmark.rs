//! Token signing benchmark.
//!
//! ```bash
//! cargo bench --package cacheauth-signer
//! ```

use cacheauth_core::ResourceKind;
use cacheauth_signer::{sigv4, AwsCredentials, IamAuthTokenRequest, TokenRequestSpec};
use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn token_request(kind: ResourceKind) -> IamAuthTokenRequest {
    let spec = TokenRequestSpec::new("my-user-id", "my-replication-group-id", "eu-west-1", kind)
        .expect("valid spec");
    IamAuthTokenRequest::new(spec)
}

// ============================================================================
// Signing
// ============================================================================

fn benchmark_token_signing(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing/token");
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

    let permanent = AwsCredentials::new("fakeAccessKeyId", "fakeSecretKey");
    let temporary = AwsCredentials::temporary("fakeAccessKeyId", "fakeSecretKey", "fakeSessionToken");

    for (name, creds) in [("permanent", &permanent), ("temporary", &temporary)] {
        for kind in [ResourceKind::Standard, ResourceKind::Serverless] {
            let request = token_request(kind);
            group.bench_with_input(BenchmarkId::new(name, kind), &request, |b, request| {
                b.iter(|| {
                    let token = request.to_signed_token(black_box(creds), black_box(now)).unwrap();
                    black_box(token)
                })
            });
        }
    }

    group.finish();
}

// ============================================================================
// Presign
// ============================================================================

fn benchmark_presign(c: &mut Criterion) {
    let mut group = c.benchmark_group("signing/presign");
    let creds = AwsCredentials::new("fakeAccessKeyId", "fakeSecretKey");
    let request = token_request(ResourceKind::Standard).spec().to_signable_request();
    let params = sigv4::SigningParams {
        credentials: &creds,
        region: "eu-west-1",
        service: cacheauth_signer::SERVICE_NAME,
        time: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        expires_in_secs: 900,
    };

    group.bench_function("query_params", |b| {
        b.iter(|| black_box(sigv4::presign(black_box(&request), &params).unwrap()))
    });

    let query: Vec<(String, String)> = (0..10)
        .map(|i| (format!("X-Param-{}", 9 - i), format!("value/{}+{}", i, i)))
        .collect();
    group.bench_function("encode_query", |b| {
        b.iter(|| black_box(sigv4::encode_query(black_box(&query))))
    });

    group.finish();
}

criterion_group!(benches, benchmark_token_signing, benchmark_presign);
criterion_main!(benches);
