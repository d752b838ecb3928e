use parabolic_curves::{
    CurveError, Decimal, ParabolicCurve, ParabolicCurvesNd, PrecisionConfig, Ramp,
};

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn ramp(v0: f64, a: f64, duration: f64, x0: f64, config: &PrecisionConfig) -> Ramp {
    Ramp::new(v0, a, duration, x0, config).unwrap()
}

#[test]
fn test_single_ramp_kinematics() {
    let config = PrecisionConfig::default();
    let ramp = Ramp::new(0, 2, 1, 0, &config).unwrap();

    assert_eq!(*ramp.v1(), dec("2"));
    assert_eq!(*ramp.d(), dec("1"));
    assert_eq!(ramp.eval_pos(1, &config).unwrap(), dec("1"));
    assert_eq!(ramp.eval_vel(1, &config).unwrap(), dec("2"));
    assert_eq!(ramp.eval_acc(0.7, &config).unwrap(), dec("2"));

    // closed-form endpoint: x0 + v0*T + 1/2*a*T^2
    let endpoint = ramp.eval_pos(ramp.duration().clone(), &config).unwrap();
    assert_eq!(endpoint, dec("1"));
}

#[test]
fn test_append_enforces_continuity() {
    let config = PrecisionConfig::default();
    let mut curve = ParabolicCurve::from_ramps(vec![ramp(0.0, 1.0, 2.0, 0.0, &config)], &config);
    let tail = ParabolicCurve::from_ramps(vec![ramp(2.0, -1.0, 2.0, 9.0, &config)], &config);

    curve.append(&tail);

    assert_eq!(*curve.duration(), dec("4"));
    assert_eq!(*curve.d(), dec("4"));
    assert_eq!(curve.eval_pos(3, &config).unwrap(), dec("3.5"));

    // every splice point is positionally continuous
    for i in 0..curve.len() - 1 {
        let end = curve[i]
            .eval_pos(curve[i].duration().clone(), &config)
            .unwrap();
        assert!(config.approx_eq(curve[i + 1].x0(), &end));
    }
}

#[test]
fn test_append_additivity() {
    let config = PrecisionConfig::default();
    let first = ParabolicCurve::from_ramps(vec![ramp(1.0, 0.5, 2.0, 0.0, &config)], &config);
    let second = ParabolicCurve::from_ramps(vec![ramp(2.0, -1.0, 1.0, 9.0, &config)], &config);

    let mut joined = first.clone();
    joined.append(&second);

    assert_eq!(
        *joined.duration(),
        first.duration() + second.duration()
    );
    assert_eq!(*joined.d(), first.d() + second.d());

    // evaluating past the splice equals the second curve's local state,
    // position-shifted onto the first curve's endpoint
    let local = dec("0.5");
    let joined_pos = joined
        .eval_pos(first.duration() + &local, &config)
        .unwrap();
    let second_pos = second.eval_pos(local.clone(), &config).unwrap();
    let first_end = first
        .eval_pos(first.duration().clone(), &config)
        .unwrap();
    let shifted = &(&second_pos - second.x0()) + &first_end;
    assert!(config.approx_eq(&joined_pos, &shifted));

    let joined_vel = joined
        .eval_vel(first.duration() + &local, &config)
        .unwrap();
    assert_eq!(joined_vel, second.eval_vel(local, &config).unwrap());
}

#[test]
fn test_merge_scenario() {
    let config = PrecisionConfig::default();
    let mut curve = ParabolicCurve::from_ramps(
        vec![
            ramp(0.0, 1.0, 1.0, 0.0, &config),
            ramp(1.0, 1.0, 1.0, 0.5, &config),
            ramp(2.0, 2.0, 1.0, 2.0, &config),
        ],
        &config,
    );

    curve.merge(&config).unwrap();

    assert_eq!(curve.len(), 2);
    assert_eq!(*curve[0].a(), dec("1"));
    assert_eq!(*curve[0].duration(), dec("2"));
    assert_eq!(*curve[1].a(), dec("2"));
    assert_eq!(*curve[1].duration(), dec("1"));

    // no two adjacent ramps share an acceleration within tolerance
    for i in 0..curve.len() - 1 {
        assert!(!config.approx_eq(curve[i].a(), curve[i + 1].a()));
    }

    // idempotent
    let once = curve.clone();
    curve.merge(&config).unwrap();
    assert_eq!(curve, once);
}

#[test]
fn test_merge_respects_injected_tolerance() {
    // the same curve merges under a loose tolerance and not under the default
    let loose = PrecisionConfig::new(200, "1e-50").unwrap();
    let strict = PrecisionConfig::default();

    let build = |config: &PrecisionConfig| {
        ParabolicCurve::from_ramps(
            vec![
                Ramp::new(dec("0"), dec("1"), dec("1"), dec("0"), config).unwrap(),
                Ramp::new(dec("1"), dec("1") + dec("1e-60"), dec("1"), dec("0.5"), config)
                    .unwrap(),
            ],
            config,
        )
    };

    let mut merged = build(&loose);
    merged.merge(&loose).unwrap();
    assert_eq!(merged.len(), 1);

    let mut kept = build(&strict);
    kept.merge(&strict).unwrap();
    assert_eq!(kept.len(), 2);
}

#[test]
fn test_trim_boundary_properties() {
    let config = PrecisionConfig::default();
    let curve = ParabolicCurve::from_ramps(
        vec![
            ramp(0.0, 1.0, 2.0, 0.0, &config),
            ramp(2.0, 0.0, 1.0, 2.0, &config),
        ],
        &config,
    );

    // Trim(0) is a no-op
    let mut untouched = curve.clone();
    untouched.trim(0, &config).unwrap();
    assert_eq!(untouched, curve);

    // a valid delta shortens exactly
    let mut shortened = curve.clone();
    shortened.trim(0.25, &config).unwrap();
    assert_eq!(*shortened.duration(), dec("2.75"));
    assert_eq!(
        *shortened.switch_points().last().unwrap(),
        dec("2.75")
    );

    // a delta reaching the last ramp fails without mutating
    let mut rejected = curve.clone();
    assert!(rejected.trim(1.5, &config).is_err());
    assert_eq!(rejected, curve);

    // a delta beyond the whole curve fails without mutating
    let mut beyond = curve.clone();
    assert!(matches!(
        beyond.trim(4, &config),
        Err(CurveError::UntrimmableCurve { .. })
    ));
    assert_eq!(beyond, curve);
}

#[test]
fn test_switch_instant_reports_preceding_acceleration() {
    let config = PrecisionConfig::default();
    let curve = ParabolicCurve::from_ramps(
        vec![
            ramp(0.0, 2.0, 1.0, 0.0, &config),
            ramp(2.0, -2.0, 1.0, 1.0, &config),
        ],
        &config,
    );

    assert_eq!(curve.eval_acc(1, &config).unwrap(), dec("2"));
    assert_eq!(curve.eval_acc(1.25, &config).unwrap(), dec("-2"));
    assert_eq!(curve.eval_acc(2, &config).unwrap(), dec("-2"));
}

#[test]
fn test_nd_duration_synchronization() {
    let config = PrecisionConfig::default();

    let exact = ParabolicCurvesNd::from_curves(
        vec![
            ParabolicCurve::from_ramps(vec![ramp(0.0, 2.0, 1.0, 0.0, &config)], &config),
            ParabolicCurve::from_ramps(vec![ramp(1.0, -1.0, 1.0, 2.0, &config)], &config),
        ],
        &config,
    )
    .unwrap();
    assert_eq!(*exact.duration(), dec("1"));

    // a gap of ten tolerances cannot be reconciled
    let gap = dec("1") + dec("1e-99");
    let mismatched = ParabolicCurvesNd::from_curves(
        vec![
            ParabolicCurve::from_ramps(vec![ramp(0.0, 2.0, 1.0, 0.0, &config)], &config),
            ParabolicCurve::from_ramps(
                vec![Ramp::new(1.0, -1.0, gap, 2.0, &config).unwrap()],
                &config,
            ),
        ],
        &config,
    );
    assert!(matches!(
        mismatched,
        Err(CurveError::DurationMismatch { .. })
    ));

    // drift below tolerance resolves to the minimum duration
    let drift = dec("1") + dec("3e-101");
    let reconciled = ParabolicCurvesNd::from_curves(
        vec![
            ParabolicCurve::from_ramps(
                vec![Ramp::new(0.0, 2.0, drift, 0.0, &config).unwrap()],
                &config,
            ),
            ParabolicCurve::from_ramps(vec![ramp(1.0, -1.0, 1.0, 2.0, &config)], &config),
        ],
        &config,
    )
    .unwrap();
    assert_eq!(*reconciled.duration(), dec("1"));
}

#[test]
fn test_nd_evaluation_is_index_aligned() {
    let config = PrecisionConfig::default();
    let trajectory = ParabolicCurvesNd::from_curves(
        vec![
            ParabolicCurve::from_ramps(vec![ramp(0.0, 2.0, 1.0, 0.0, &config)], &config),
            ParabolicCurve::from_ramps(vec![ramp(1.0, 0.0, 1.0, 3.0, &config)], &config),
        ],
        &config,
    )
    .unwrap();

    assert_eq!(trajectory.x0_vect(), &[dec("0"), dec("3")]);
    assert_eq!(
        trajectory.eval_pos(0.5, &config).unwrap(),
        vec![dec("0.25"), dec("3.5")]
    );
    assert_eq!(
        trajectory.eval_vel(0.5, &config).unwrap(),
        vec![dec("1"), dec("1")]
    );
    assert_eq!(
        trajectory.eval_acc(0.5, &config).unwrap(),
        vec![dec("2"), dec("0")]
    );
}

#[test]
fn test_nd_append_round_trip() {
    let config = PrecisionConfig::default();
    let build = |v0: f64, a: f64, duration: f64, x0: f64| {
        ParabolicCurvesNd::from_curves(
            vec![ParabolicCurve::from_ramps(
                vec![ramp(v0, a, duration, x0, &config)],
                &config,
            )],
            &config,
        )
        .unwrap()
    };

    let mut trajectory = build(0.0, 1.0, 1.0, 0.0);
    let tail = build(1.0, -1.0, 1.0, 0.5);
    trajectory.append(&tail).unwrap();

    assert_eq!(*trajectory.duration(), dec("2"));
    // past the splice, the state matches the tail evaluated locally,
    // shifted by the head's displacement
    assert_eq!(
        trajectory.eval_vel(1.5, &config).unwrap(),
        tail.eval_vel(0.5, &config).unwrap()
    );
    let head_end = dec("0.5"); // displacement of the head ramp
    let tail_local = tail.eval_pos(0.5, &config).unwrap();
    let expected = &(&tail_local[0] - &tail[0].x0().clone()) + &head_end;
    assert_eq!(trajectory.eval_pos(1.5, &config).unwrap(), vec![expected]);
}
