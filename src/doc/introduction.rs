/*!
# Introduction to the Tube Machine

The machine has three places to keep numbers and one stack.

* Scalar variables, named `s0`, `s1` and so on. Variables 0 through 7 are
  also called registers `regA` through `regH`.
* Arrays, named `a0`, `a1` and so on. Every element is a number. Arrays
  start empty and grow with `ar_set_siz`.
* Memory, 65536 numbered cells. Going outside of it stops the machine.
* The stack holds numbers and whole array copies mixed together.

Nothing needs to be declared. Reading a variable or array that was never
written creates it with zero or empty contents.

Every instruction takes its arguments in the same way. A number is used
as is. A variable is read or written. The special argument `IP` is the
instruction pointer; writing to it is a jump. A label stands for the
position of the instruction that followed it when it was added.

<pre><code>&nbsp;   0  val_copy 10 s0
&nbsp;loop:
&nbsp;   1  out_int s0
&nbsp;   2  out_char 10
&nbsp;   3  sub s0 1 s0
&nbsp;   4  jump_if_n0 s0 loop
</code></pre>

Start the host with `tube countdown` and type `list`, then `step` a few
times and look at `vars`. Type `run` to finish and `restart` to go again.

Errors such as dividing by zero or reading past the end of an array are
reported and the machine keeps going with the next instruction. Only a
memory access outside `0..65536` stops the program.

Every instruction has a cost. Most cost 1, memory instructions cost 100,
`nop` and `debug_status` are free. Start with `--timeout=N` to halt a
program once it has spent N, and `--cost` to see the total when it ends.

*/
