/*!
# Instruction Set

Arguments are numbered from 1. Where an instruction produces a value,
the last argument receives it and must be a variable or `IP`.

## Arithmetic

`add`, `sub` and `mult` work on the full floating point values.
`div` and `mod` first truncate both sides to integers; the quotient is
truncated toward zero and the remainder takes the sign of the dividend.
A zero divisor is reported and the destination is left alone.

## Comparison

`test_less`, `test_gtr`, `test_equ`, `test_nequ`, `test_gte` and
`test_lte` store 1 when the comparison holds and 0 when it does not.

## Control

`jump` moves to its argument. `jump_if_0` and `jump_if_n0` check the
integer part of the first argument and then move to the second.
A jump to a position outside the program ends it.

## Stack

`push` and `pop` move a single number. `ar_push` pushes a copy of a
whole array, `ar_pop` replaces an array with the copy on top. Popping
the wrong kind of entry, or popping an empty stack, is reported and
leaves the stack alone.

## Arrays

`ar_get_idx`, `ar_set_idx`, `ar_get_siz`, `ar_set_siz` and `ar_copy`.
Elements are stored and read back as integers. An index outside the
array is reported with the instruction's line number.

## Memory

`load`, `store` and `mem_copy` move integers between memory and
variables.

## Output

`out_int`, `out_float` and `out_char` write to the diagnostics buffer.
Floats print with six significant digits.
`out_char` keeps only the low byte of the integer and writes it as the
Latin-1 character with that code. The buffer is UTF-8 text, so codes 128
through 255 take two bytes in it: `out_char 200` appends `È`, the bytes
`C3 88`, not a single byte 200.

## Other

`random` picks an integer from `0` up to but not including its first
argument. `nop` does nothing. `debug_status` dumps the registers and all
non-zero memory into the trace when tracing is on.

*/
