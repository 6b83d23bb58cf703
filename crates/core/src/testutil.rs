//! Shared fixtures for unit tests.

use crate::language::PhoneticDict;

pub const FIXTURE_CMUDICT: &str = "\
;;; tiny cmudict fixture
A AH0
A(2) EY1
AND AH0 N D
AWAY AH0 W EY1
BAD B AE1 D
BAT B AE1 T
BRIGHT B R AY1 T
CAR K AA1 R
CAT K AE1 T
DAY D EY1
DOG D AO1 G
FAR F AA1 R
FOG F AO1 G
FORGOTTEN F ER0 G AA1 T AH0 N
FUN F AH1 N
GOOD G UH1 D
HAPPY HH AE1 P IY0
HAT HH AE1 T
HATE HH EY1 T
HE HH IY1
HIGH HH AY1
I AY1
IN IH0 N
IS IH1 Z
LIGHT L AY1 T
LOG L AO1 G
LOVE L AH1 V
MAT M AE1 T
MORNING M AO1 R N IH0 NG
MY M AY1
NIGHT N AY1 T
ON AA1 N
RUN R AH1 N
RUNS R AH1 N Z
SAD S AE1 D
SAT S AE1 T
SAW S AO1
SEES S IY1 Z
SHE SH IY1
SHINES SH AY1 N Z
SKY S K AY1
STAR S T AA1 R
SUN S AH1 N
THE DH AH0
THE(2) DH IY0
TODAY T AH0 D EY1
WAS W AA1 Z
WAY W EY1
YELLOW Y EH1 L OW0
";

pub fn fixture_dict() -> PhoneticDict {
    PhoneticDict::from_cmudict_str(FIXTURE_CMUDICT).unwrap()
}

/// Split a space-separated phoneme string.
pub fn phonemes(s: &str) -> Vec<String> {
    s.split_whitespace().map(|p| p.to_string()).collect()
}
