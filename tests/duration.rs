extern crate civil_time;

use civil_time::{Designator, Duration};
use civil_time::{HOUR, MICROSECOND, MILLISECOND, MINUTE, NANOSECOND, SECOND};


mod construction {
    use super::*;

    macro_rules! test {
        ($name:ident: $extent:expr => $nanos:expr) => {
            #[test]
            fn $name() {
                assert_eq!(Duration::of($extent).as_nanoseconds(), $nanos);
            }
        };
    }

    test!(positive_nanoseconds:  9_000_000_000_000 * NANOSECOND => 9_000_000_000_000.0);
    test!(positive_microseconds: 9_000_000_000 * MICROSECOND    => 9_000_000_000_000.0);
    test!(positive_milliseconds: 9_000_000 * MILLISECOND        => 9_000_000_000_000.0);
    test!(positive_seconds:      9_000 * SECOND                 => 9_000_000_000_000.0);
    test!(positive_minutes:      150 * MINUTE                   => 9_000_000_000_000.0);
    test!(positive_hours:        2 * HOUR                       => 7_200_000_000_000.0);

    test!(negative_nanoseconds:  -9_000_000_000_000 * NANOSECOND => -9_000_000_000_000.0);
    test!(negative_microseconds: -9_000_000_000 * MICROSECOND    => -9_000_000_000_000.0);
    test!(negative_milliseconds: -9_000_000 * MILLISECOND        => -9_000_000_000_000.0);
    test!(negative_seconds:      -9_000 * SECOND                 => -9_000_000_000_000.0);
    test!(negative_minutes:      -150 * MINUTE                   => -9_000_000_000_000.0);
    test!(negative_hours:        -2 * HOUR                       => -7_200_000_000_000.0);
}


mod units {
    use super::*;

    // Each accessor must agree bit-for-bit with direct construction from
    // that unit.
    macro_rules! test {
        ($name:ident: $accessor:ident == $expected:expr) => {
            #[test]
            fn $name() {
                let d = Duration::of(9_000_000_000_000 * NANOSECOND);
                assert_eq!(d.$accessor(), $expected);

                let d = Duration::of(-9_000_000_000_000 * NANOSECOND);
                assert_eq!(d.$accessor(), -$expected);
            }
        };
    }

    test!(nanoseconds:  as_nanoseconds  == 9_000_000_000_000.0);
    test!(microseconds: as_microseconds == 9_000_000_000.0);
    test!(milliseconds: as_milliseconds == 9_000_000.0);
    test!(seconds:      as_seconds      == 9_000.0);
    test!(minutes:      as_minutes      == 150.0);
    test!(hours:        as_hours        == 2.5);
}


mod addition {
    use super::*;

    macro_rules! test {
        ($name:ident: $a:expr, $b:expr => $expected:expr) => {
            #[test]
            fn $name() {
                let (a, b) = (Duration::of($a), Duration::of($b));
                let expected = Duration::of($expected);

                // Addition is commutative, and can_add must agree with it.
                assert!(a.can_add(b));
                assert!(b.can_add(a));
                assert_eq!(a + b, expected);
                assert_eq!(b + a, expected);
            }
        };
    }

    test!(seconds_component:       HOUR, HOUR => 2 * HOUR);
    test!(nanoseconds_component:   MILLISECOND, MILLISECOND => 2 * MILLISECOND);
    test!(both_components:         HOUR + 2 * MILLISECOND, HOUR + 2 * MILLISECOND
                                => 2 * HOUR + 4 * MILLISECOND);
    test!(minus_seconds:           2 * HOUR, -HOUR => HOUR);
    test!(minus_nanoseconds:       2 * MILLISECOND, -MILLISECOND => MILLISECOND);
    test!(minus_both:              2 * HOUR + 4 * MILLISECOND, -(HOUR + 2 * MILLISECOND)
                                => HOUR + 2 * MILLISECOND);
    test!(carry_into_seconds:      750 * MILLISECOND, 750 * MILLISECOND => 1_500 * MILLISECOND);
    test!(borrow_from_seconds:     SECOND + 500 * MILLISECOND, -750 * MILLISECOND
                                => 750 * MILLISECOND);
}


mod range {
    use super::*;

    #[test]
    fn overflow_on_the_seconds_component() {
        assert!(!Duration::MAX.can_add(Duration::of(SECOND)));
        assert!(!Duration::of(SECOND).can_add(Duration::MAX));
        assert_eq!(Duration::MAX.checked_add(Duration::of(SECOND)), None);
    }

    #[test]
    fn overflow_on_the_nanoseconds_component() {
        let nearly = Duration::MAX + Duration::of(-500 * MILLISECOND);
        assert!(!nearly.can_add(Duration::of(501 * MILLISECOND)));
        assert!(nearly.can_add(Duration::of(500 * MILLISECOND)));
    }

    #[test]
    fn underflow_on_the_seconds_component() {
        assert!(!Duration::MIN.can_add(Duration::of(-SECOND)));
        assert_eq!(Duration::MIN.checked_add(Duration::of(-SECOND)), None);
    }

    #[test]
    fn underflow_on_the_nanoseconds_component() {
        let nearly = Duration::MIN + Duration::of(500 * MILLISECOND);
        assert!(!nearly.can_add(Duration::of(-501 * MILLISECOND)));
        assert!(nearly.can_add(Duration::of(-500 * MILLISECOND)));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn adding_past_the_maximum_panics() {
        let _ = Duration::MAX + Duration::of(SECOND);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn adding_past_the_minimum_panics() {
        let _ = Duration::MIN + Duration::of(-SECOND);
    }
}


mod formatting {
    use super::*;

    macro_rules! test {
        ($name:ident: $extent:expr, [$($designator:ident),*] => $expected:expr) => {
            #[test]
            fn $name() {
                let d = Duration::of($extent);
                assert_eq!(d.format(&[$(Designator::$designator),*]), $expected);
            }
        };
    }

    test!(default_hms: HOUR + 15 * MINUTE + 30 * SECOND + 500 * MILLISECOND, [] => "PT1H15M30.5S");
    test!(default_hm:  HOUR + 15 * MINUTE, [] => "PT1H15M");
    test!(default_hs:  12 * HOUR + 30 * SECOND + 500 * MILLISECOND, [] => "PT12H0M30.5S");
    test!(default_h:   HOUR, [] => "PT1H");
    test!(default_ms:  15 * MINUTE + 30 * SECOND + 500 * MILLISECOND, [] => "PT15M30.5S");
    test!(default_m:   15 * MINUTE, [] => "PT15M");
    test!(default_s:   30 * SECOND + 500 * MILLISECOND, [] => "PT30.5S");

    test!(exclusive_hms: HOUR + 15 * MINUTE + 30 * SECOND + 500 * MILLISECOND,
          [Hours, Minutes, Seconds] => "PT1H15M30.5S");
    test!(exclusive_hm:  HOUR + 15 * MINUTE + 30 * SECOND + 600 * MILLISECOND,
          [Hours, Minutes] => "PT1H15.51M");
    test!(exclusive_hs:  12 * HOUR + MINUTE + 30 * SECOND + 500 * MILLISECOND,
          [Hours, Seconds] => "PT12H90.5S");
    test!(exclusive_h:   HOUR + 30 * MINUTE + 36 * SECOND + 36 * MILLISECOND,
          [Hours] => "PT1.51001H");
    test!(exclusive_ms:  HOUR + 15 * MINUTE + 30 * SECOND + 500 * MILLISECOND,
          [Minutes, Seconds] => "PT75M30.5S");
    test!(exclusive_m:   HOUR + 15 * MINUTE + 30 * SECOND + 600 * MILLISECOND,
          [Minutes] => "PT75.51M");
    test!(exclusive_s:   HOUR + 15 * MINUTE + 30 * SECOND + 500 * MILLISECOND,
          [Seconds] => "PT4530.5S");
}


mod parsing {
    use super::*;

    macro_rules! test {
        ($name:ident: $input:expr => $extent:expr) => {
            #[test]
            fn $name() {
                let parsed = Duration::parse($input).unwrap();
                assert_eq!(parsed, Duration::of($extent));
            }
        };
    }

    test!(hms_integers: "PT5H3M1S" => 5 * HOUR + 3 * MINUTE + SECOND);
    test!(hms_floats:   "PT4.5H3.25M1.1S"
        => (4.5 * HOUR as f64 + 3.25 * MINUTE as f64 + 1.1 * SECOND as f64) as i64);
    test!(hm_integers:  "PT5H3M" => 5 * HOUR + 3 * MINUTE);
    test!(hm_floats:    "PT4.5H3.25M" => (4.5 * HOUR as f64 + 3.25 * MINUTE as f64) as i64);
    test!(hs_integers:  "PT5H1S" => 5 * HOUR + SECOND);
    test!(hs_floats:    "PT4.5H1.1S" => (4.5 * HOUR as f64 + 1.1 * SECOND as f64) as i64);
    test!(h_integer:    "PT5H" => 5 * HOUR);
    test!(h_float:      "PT4.5H" => (4.5 * HOUR as f64) as i64);
    test!(ms_integers:  "PT3M1S" => 3 * MINUTE + SECOND);
    test!(ms_floats:    "PT3.25M1.1S" => (3.25 * MINUTE as f64 + 1.1 * SECOND as f64) as i64);
    test!(m_integer:    "PT3M" => 3 * MINUTE);
    test!(m_float:      "PT3.25M" => (3.25 * MINUTE as f64) as i64);
    test!(s_integer:    "PT1S" => SECOND);
    test!(s_float:      "PT1.1S" => (1.1 * SECOND as f64) as i64);

    test!(negative:     "-PT1H" => -HOUR);
    test!(repeated_unit: "PT1H1H" => 2 * HOUR);

    #[test]
    fn from_str_is_parse() {
        let duration: Duration = "PT90M".parse().unwrap();
        assert_eq!(duration, Duration::of(90 * MINUTE));
    }

    #[test]
    fn a_period_is_not_a_duration() {
        assert!(Duration::parse("P1Y").is_err());
    }
}


mod round_trips {
    use super::*;

    macro_rules! test {
        ($name:ident: $extent:expr) => {
            #[test]
            fn $name() {
                let d = Duration::of($extent);
                assert_eq!(Duration::parse(&d.format(&[])).unwrap(), d);
            }
        };
    }

    test!(zero: 0);
    test!(fractional_seconds: 30 * SECOND + 500 * MILLISECOND);
    test!(all_units: 7 * HOUR + 31 * MINUTE + 12 * SECOND + 345 * MILLISECOND);
    test!(negative: -(2 * HOUR + 30 * MINUTE));
    test!(sub_second: 125 * MILLISECOND);
}
