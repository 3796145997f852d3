/*
 * This Source Code Form is subject to the terms of the
 * Mozilla Public License, v. 2.0. If a copy of the MPL
 * was not distributed with this file, You can obtain one at http://mozilla.org/MPL/2.0/.
 */

/// Assert that lexing .data under the given .regime yields
/// exactly the expected token kinds, in order, ending with
/// the stream end
macro_rules! tokens {
    ($data:expr, $regime:expr => $( $expected:expr ),+ $(,)? ) => {{
        let mut scan = crate::lexer::tests::ScanIter::new($data);
        let regime = $regime;

        $(
            let token = scan
                .next_token(regime)
                .expect("lexer errored")
                .expect("token stream ended early");

            pretty_assertions::assert_eq!(token.kind, $expected, "in input: {:?}", $data);
        )+

        pretty_assertions::assert_eq!(
            scan.next_token(regime).expect("lexer errored"),
            None,
            "expected no tokens after the stream end"
        );
    }};
}

/// Assert that lexing .data under the given .regime fails
/// with the expected error
macro_rules! tokens_err {
    ($data:expr, $regime:expr => $expected:expr ) => {{
        let mut scan = crate::lexer::tests::ScanIter::new($data);
        let regime = $regime;

        let error = loop
        {
            match scan.next_token(regime)
            {
                Ok(Some(_)) => continue,
                Ok(None) => panic!("lexer accepted invalid input: {:?}", $data),
                Err(e) => break e,
            }
        };

        pretty_assertions::assert_eq!(error, $expected, "in input: {:?}", $data);
    }};
}
